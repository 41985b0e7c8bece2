pub mod daily_work;
pub mod filters;
pub mod infrastructure;
pub mod record_id;
pub mod survey;
pub mod work_scope;

pub use daily_work::{DailyWork, DailyWorkInput};
pub use filters::RecordFilter;
pub use infrastructure::{Infrastructure, InfrastructureInput};
pub use record_id::RecordId;
pub use survey::{Chamber, InfrastructureInfo};
pub use work_scope::WorkScope;

use serde::{Deserialize, Deserializer};

/// `null` reads as `T::default()`; `#[serde(default)]` alone only covers a missing key.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
