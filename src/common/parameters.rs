use std::fmt;

use super::NameValue;
use crate::Error;
use crate::lexer::Lexer;
use crate::util::{Element, QualityDisplay, check_quality, parse_quality};

const QUALITY: &str = "q";

/// The ordered `*( ";" parameter )` list owned by values such as
/// [`MediaType`], [`ContentDisposition`] and [`TransferCoding`].
///
/// Insertion order is preserved and duplicate names are allowed.
/// Lookups by name are ASCII case insensitive and return the first match.
///
/// Projections such as [`MediaType::charset`] read from and write to
/// this list, it is the only place those values are stored.
///
/// [`MediaType`]: super::MediaType
/// [`MediaType::charset`]: super::MediaType::charset
/// [`ContentDisposition`]: super::ContentDisposition
/// [`TransferCoding`]: super::TransferCoding
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Parameters(Vec<NameValue>);

impl Parameters {
    /// Create an empty parameter list.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the parameters in order.
    pub fn iter(&self) -> std::slice::Iter<'_, NameValue> {
        self.0.iter()
    }

    /// Iterate mutably over the parameters in order.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, NameValue> {
        self.0.iter_mut()
    }

    /// Append a parameter.
    pub fn push(&mut self, parameter: NameValue) {
        self.0.push(parameter);
    }

    /// The first parameter with the given name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&NameValue> {
        self.0.iter().find(|p| p.name().eq_ignore_ascii_case(name))
    }

    /// The first parameter with the given name, mutably.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut NameValue> {
        self.0.iter_mut().find(|p| p.name().eq_ignore_ascii_case(name))
    }

    /// The value of the first parameter with the given name.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(NameValue::value)
    }

    /// `true` if a parameter with the given name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Remove and return the first parameter with the given name.
    pub fn remove(&mut self, name: &str) -> Option<NameValue> {
        let index = self
            .0
            .iter()
            .position(|p| p.name().eq_ignore_ascii_case(name))?;
        Some(self.0.remove(index))
    }

    /// Keep only the parameters for which `f` returns `true`.
    pub fn retain(&mut self, f: impl FnMut(&NameValue) -> bool) {
        self.0.retain(f);
    }

    /// Remove all parameters.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Find-or-insert `name` with an already validated value,
    /// `None` removes the first parameter of that name.
    pub(crate) fn set_value_unchecked(&mut self, name: &'static str, value: Option<String>) {
        match (self.get_mut(name), value) {
            (Some(parameter), Some(value)) => parameter.set_value_unchecked(Some(value)),
            (None, Some(value)) => self.0.push(NameValue::new_unchecked(name, Some(value))),
            (Some(_), None) => {
                self.remove(name);
            }
            (None, None) => (),
        }
    }

    /// The `q` parameter, `None` when absent, malformed or out of range.
    pub(crate) fn quality(&self) -> Option<f64> {
        parse_quality(self.value(QUALITY)?)
    }

    pub(crate) fn set_quality(&mut self, quality: Option<f64>) -> Result<(), Error> {
        let quality = quality.map(check_quality).transpose()?;
        self.set_value_unchecked(QUALITY, quality.map(|q| QualityDisplay(q).to_string()));
        Ok(())
    }

    /// Reads `*( ";" parameter )`.
    pub(crate) fn read(lexer: &mut Lexer<'_>) -> Option<Self> {
        let mut parameters = Self::new();
        while lexer.eat(b';') {
            parameters.push(NameValue::read(lexer)?);
        }
        Some(parameters)
    }
}

impl fmt::Display for Parameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for parameter in &self.0 {
            write!(f, "; {parameter}")?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Parameters {
    type Item = &'a NameValue;
    type IntoIter = std::slice::Iter<'a, NameValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for &'a mut Parameters {
    type Item = &'a mut NameValue;
    type IntoIter = std::slice::IterMut<'a, NameValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl IntoIterator for Parameters {
    type Item = NameValue;
    type IntoIter = std::vec::IntoIter<NameValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl Extend<NameValue> for Parameters {
    fn extend<T: IntoIterator<Item = NameValue>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

impl FromIterator<NameValue> for Parameters {
    fn from_iter<T: IntoIterator<Item = NameValue>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
