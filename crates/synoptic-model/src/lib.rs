pub mod form;
pub mod organ;
pub mod value;

pub use form::FormValues;
pub use organ::{
    ChoiceOption, FieldDef, FieldKind, HistologySubtype, HistologyType, OrganConfig, Section,
    StageRule, StageTable,
};
pub use value::FieldValue;
