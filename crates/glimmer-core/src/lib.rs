pub mod enums;
pub mod error;
pub mod value;

pub use enums::{EnumDescriptor, EnumSetting, EnumVariant};
pub use error::RegistryError;
pub use value::{SettingKind, SettingValue};
