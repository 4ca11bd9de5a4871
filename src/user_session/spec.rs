use crate::error::AppError;

/// A parsed console parameter
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    U8(u8),
    U16(u16),
    Number(f64),
    Text(String),
    Bool(bool),
}

impl Value {
    pub fn as_u8(&self) -> Result<u8, AppError> {
        match self {
            Value::U8(value) => Ok(*value),
            _ => Err(self.type_mismatch("u8")),
        }
    }

    pub fn as_u16(&self) -> Result<u16, AppError> {
        match self {
            Value::U16(value) => Ok(*value),
            Value::U8(value) => Ok(*value as u16),
            _ => Err(self.type_mismatch("u16")),
        }
    }

    pub fn as_number(&self) -> Result<f64, AppError> {
        match self {
            Value::Number(value) => Ok(*value),
            _ => Err(self.type_mismatch("number")),
        }
    }

    pub fn as_text(&self) -> Result<String, AppError> {
        match self {
            Value::Text(value) => Ok(value.clone()),
            _ => Err(self.type_mismatch("text")),
        }
    }

    pub fn as_bool(&self) -> Result<bool, AppError> {
        match self {
            Value::Bool(value) => Ok(*value),
            _ => Err(self.type_mismatch("bool")),
        }
    }

    fn type_mismatch(&self, expected: &str) -> AppError {
        AppError::invalid_parameter(format!("expected {}, found {:?}", expected, self))
    }
}

pub struct ParseParamError {}

pub struct Spec {
    pub name: String,
    pub required: bool,
    pub hint: Option<String>,
    pub parse: fn(&String) -> Result<Value, ParseParamError>,
}

impl Spec {
    pub fn u8(name: &str, required: bool) -> Self {
        Self {
            name: name.to_string(),
            required: required,
            hint: None,
            parse: |src| {
                return match parse_uint(src, u8::from_str_radix) {
                    Ok(value) => Ok(Value::U8(value)),
                    Err(_) => Err(ParseParamError {}),
                };
            },
        }
    }

    pub fn u16(name: &str, required: bool) -> Self {
        Self {
            name: name.to_string(),
            required: required,
            hint: None,
            parse: |src| {
                return match parse_uint(src, u16::from_str_radix) {
                    Ok(value) => Ok(Value::U16(value)),
                    Err(_) => Err(ParseParamError {}),
                };
            },
        }
    }

    pub fn number(name: &str, required: bool) -> Self {
        Self {
            name: name.to_string(),
            required: required,
            hint: None,
            parse: |src| {
                return match src.trim().parse::<f64>() {
                    Ok(value) if value.is_finite() => Ok(Value::Number(value)),
                    _ => Err(ParseParamError {}),
                };
            },
        }
    }

    pub fn str(name: &str, required: bool) -> Self {
        Self {
            name: name.to_string(),
            required: required,
            hint: None,
            parse: |src| Ok(Value::Text(src.trim().to_string())),
        }
    }

    /// Accepts on/off as well as true/false
    pub fn bool(name: &str, required: bool) -> Self {
        Self {
            name: name.to_string(),
            required: required,
            hint: None,
            parse: |src| {
                return match src.trim().to_ascii_lowercase().as_str() {
                    "on" | "true" | "1" => Ok(Value::Bool(true)),
                    "off" | "false" | "0" => Ok(Value::Bool(false)),
                    _ => Err(ParseParamError {}),
                };
            },
        }
    }

    pub fn with_hint(mut self, hint: &str) -> Self {
        self.hint = Some(hint.to_string());
        self
    }
}

fn parse_uint<T>(
    src: &str,
    from_str_radix: fn(&str, u32) -> Result<T, std::num::ParseIntError>,
) -> Result<T, std::num::ParseIntError> {
    let s = src.trim();
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        from_str_radix(hex, 16)
    } else {
        from_str_radix(s, 10)
    }
}
