//! The typed header values.

pub use self::authentication::Authentication;
pub use self::cache_control::CacheControl;
pub use self::content_disposition::ContentDisposition;
pub use self::content_range::ContentRange;
pub use self::entity_tag::EntityTag;
pub use self::media_type::{MediaType, MediaTypeWithQuality};
pub use self::name_value::NameValue;
pub use self::name_value_with_parameters::NameValueWithParameters;
pub use self::parameters::Parameters;
pub use self::product::{Product, ProductInfo};
pub use self::range::{Range, RangeItem};
pub use self::range_condition::RangeCondition;
pub use self::retry_condition::RetryCondition;
pub use self::string_with_quality::StringWithQuality;
pub use self::transfer_coding::{TransferCoding, TransferCodingWithQuality};
pub use self::via::Via;
pub use self::warning::Warning;

mod authentication;
mod cache_control;
mod content_disposition;
mod content_range;
mod entity_tag;
mod media_type;
mod name_value;
mod name_value_with_parameters;
mod parameters;
mod product;
mod range;
mod range_condition;
mod retry_condition;
mod string_with_quality;
mod transfer_coding;
mod via;
mod warning;
