use http::HeaderMap;
use http::header::{AsHeaderName, IntoHeaderName};

use crate::{Error, ListValue, TypedValue};

/// An extension trait adding "typed value" methods to `http::HeaderMap`.
///
/// # Example
///
/// ```
/// use http::HeaderMap;
/// use http::header::{CACHE_CONTROL, VIA};
/// use hvalue::{CacheControl, HeaderMapExt, Via};
///
/// let mut headers = HeaderMap::new();
/// headers
///     .typed_value_insert(CACHE_CONTROL, &CacheControl::new().with_no_store(true))
///     .unwrap();
/// headers.insert(VIA, "1.0 fred, 1.1 p.example.net".parse().unwrap());
/// headers.append(VIA, "1.1 proxy".parse().unwrap());
///
/// let cache_control: CacheControl = headers.typed_value_get(CACHE_CONTROL).unwrap();
/// assert!(cache_control.no_store());
///
/// let vias: Vec<Via> = headers.typed_values_try_get(VIA).unwrap();
/// assert_eq!(vias.len(), 3);
/// ```
pub trait HeaderMapExt: self::sealed::Sealed {
    /// Encodes `value` and inserts it, replacing all existing values of `name`.
    fn typed_value_insert<T>(&mut self, name: impl IntoHeaderName, value: &T) -> Result<(), Error>
    where
        T: TypedValue;

    /// Encodes `value` and appends it to the existing values of `name`.
    fn typed_value_append<T>(&mut self, name: impl IntoHeaderName, value: &T) -> Result<(), Error>
    where
        T: TypedValue;

    /// Decodes the first value of `name`, `None` if it is missing or invalid.
    fn typed_value_get<T>(&self, name: impl AsHeaderName) -> Option<T>
    where
        T: TypedValue;

    /// Decodes the first value of `name`, `Ok(None)` if it is missing.
    fn typed_value_try_get<T>(&self, name: impl AsHeaderName) -> Result<Option<T>, Error>
    where
        T: TypedValue;

    /// Decodes all values of `name`, each holding a list of elements.
    ///
    /// A missing header yields an empty list.
    fn typed_values_try_get<T>(&self, name: impl AsHeaderName) -> Result<Vec<T>, Error>
    where
        T: ListValue;
}

impl HeaderMapExt for HeaderMap {
    fn typed_value_insert<T>(&mut self, name: impl IntoHeaderName, value: &T) -> Result<(), Error>
    where
        T: TypedValue,
    {
        let value = value.encode()?;
        self.insert(name, value);
        Ok(())
    }

    fn typed_value_append<T>(&mut self, name: impl IntoHeaderName, value: &T) -> Result<(), Error>
    where
        T: TypedValue,
    {
        let value = value.encode()?;
        self.append(name, value);
        Ok(())
    }

    fn typed_value_get<T>(&self, name: impl AsHeaderName) -> Option<T>
    where
        T: TypedValue,
    {
        match HeaderMapExt::typed_value_try_get(self, name) {
            Ok(value) => value,
            Err(err) => {
                tracing::trace!(
                    "ignore invalid {} header value: {err}",
                    std::any::type_name::<T>()
                );
                None
            }
        }
    }

    fn typed_value_try_get<T>(&self, name: impl AsHeaderName) -> Result<Option<T>, Error>
    where
        T: TypedValue,
    {
        self.get(name).map(T::decode).transpose()
    }

    fn typed_values_try_get<T>(&self, name: impl AsHeaderName) -> Result<Vec<T>, Error>
    where
        T: ListValue,
    {
        let mut values = Vec::new();
        for value in self.get_all(name) {
            let s = value.to_str().map_err(|err| {
                tracing::debug!("header value is not visible ASCII: {err}");
                Error::format("header value contains opaque bytes")
            })?;
            values.extend(T::parse_list(s)?);
        }
        Ok(values)
    }
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for ::http::HeaderMap {}
}
