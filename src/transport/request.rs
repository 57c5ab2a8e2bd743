use crate::errors::{AppError, AppResult};
use serde_json::{Value, json};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    Get,
    Patch,
    Other(String),
}

impl FromStr for Method {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        let upper = s.trim().to_ascii_uppercase();
        match upper.as_str() {
            "" => Err(AppError::invalid("empty request method")),
            "GET" => Ok(Method::Get),
            "PATCH" => Ok(Method::Patch),
            _ => Ok(Method::Other(upper)),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => f.write_str("GET"),
            Method::Patch => f.write_str("PATCH"),
            Method::Other(m) => f.write_str(m),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

impl Request {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn patch(path: impl Into<String>, body: Value) -> Self {
        Self {
            body: Some(body),
            ..Self::new(Method::Patch, path)
        }
    }

    /// Path segments without the query string and empty parts.
    pub fn segments(&self) -> Vec<&str> {
        let path = self.path.split('?').next().unwrap_or("");
        path.split('/').filter(|s| !s.is_empty()).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    pub body: Value,
}

impl Response {
    /// `{ statusCode: 200, data }`
    pub fn data(data: Value) -> Self {
        Self {
            status: 200,
            body: json!({ "statusCode": 200, "data": data }),
        }
    }

    /// `{ statusCode: "200", message }`; the update route reports its status
    /// code as a string.
    pub fn message(message: &str) -> Self {
        Self {
            status: 200,
            body: json!({ "statusCode": "200", "message": message }),
        }
    }

    /// `{ error, statusCode }`
    pub fn error(status: u16, error: impl Into<String>) -> Self {
        Self {
            status,
            body: json!({ "error": error.into(), "statusCode": status }),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
