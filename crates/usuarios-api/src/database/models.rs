use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use sqlx::FromRow;

/// Row of the `usuarios` table, serialized as-is (password included).
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Usuario {
    pub id_usuario: i32,
    pub nombre: String,
    pub correo: String,
    pub password: String,
}

/// Payload for `POST /api/usuarios`. Fields keep their raw JSON value so
/// the handler can apply its own presence rules.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NuevoUsuario {
    pub nombre: Option<Value>,
    pub correo: Option<Value>,
    pub password: Option<Value>,
}

impl NuevoUsuario {
    /// All three fields present and truthy (`null`, `false`, `0` and `""` are not).
    pub fn validate(self) -> Option<ValidNuevoUsuario> {
        match (truthy_text(self.nombre), truthy_text(self.correo), truthy_text(self.password)) {
            (Some(nombre), Some(correo), Some(password)) => Some(ValidNuevoUsuario {
                nombre,
                correo,
                password,
            }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidNuevoUsuario {
    pub nombre: String,
    pub correo: String,
    pub password: String,
}

/// Payload for `PUT /api/usuarios/:id`. `None` keeps the stored value;
/// any other scalar is stored as text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ActualizarUsuario {
    #[serde(default, deserialize_with = "nullable_text")]
    pub nombre: Option<String>,
    #[serde(default, deserialize_with = "nullable_text")]
    pub correo: Option<String>,
    #[serde(default, deserialize_with = "nullable_text")]
    pub password: Option<String>,
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn as_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

fn truthy_text(value: Option<Value>) -> Option<String> {
    value.filter(is_truthy).and_then(as_text)
}

fn nullable_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(as_text))
}
