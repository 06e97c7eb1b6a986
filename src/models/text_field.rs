//! Campo de texto libre con tres estados
//!
//! Distingue "nunca tocado", "vaciado por el usuario" y "con valor".

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "lowercase")]
pub enum TextField {
    #[default]
    Unset,
    Empty,
    Value(String),
}

impl TextField {
    /// Construir desde la entrada del usuario (texto sin recortar)
    pub fn from_input(input: &str) -> Self {
        if input.is_empty() {
            TextField::Empty
        } else {
            TextField::Value(input.to_string())
        }
    }

    /// Construir desde un valor persistido opcional
    pub fn from_option(value: Option<&str>) -> Self {
        match value {
            Some(v) => Self::from_input(v),
            None => TextField::Unset,
        }
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, TextField::Unset)
    }

    /// Texto tal como lo ve el usuario en el input
    pub fn as_str(&self) -> &str {
        match self {
            TextField::Value(v) => v,
            _ => "",
        }
    }

    /// Valor a enviar: recortado, y ausente si queda vacío
    pub fn submitted(&self) -> Option<String> {
        match self {
            TextField::Value(v) => {
                let trimmed = v.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            _ => None,
        }
    }
}
