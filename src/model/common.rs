use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type Id = String;

/// Discriminates what an element or display attribute renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementType {
    Text,
    Button,
    Table,
    Link,
    Icon,
    Badge,
    Image,
    WizardForm,
    #[serde(rename = "Function_text")]
    FunctionText,
}

/// Badge palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Plain,
    Grey,
}

pub fn generate_id() -> Id {
    Uuid::new_v4().to_string()
}
