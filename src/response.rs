//! Response body helpers. Errors use `{ "error": ... }`, informational replies `{ "message": ... }`.

use serde::Serialize;

use crate::schema::FieldError;

#[derive(Serialize, Debug)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

#[derive(Serialize, Debug)]
pub struct MessageBody {
    pub message: String,
}

pub fn error_body(message: &str) -> ErrorBody {
    ErrorBody {
        error: message.to_string(),
        details: None,
    }
}

pub fn error_body_with_details(message: &str, details: Vec<FieldError>) -> ErrorBody {
    ErrorBody {
        error: message.to_string(),
        details: if details.is_empty() { None } else { Some(details) },
    }
}

pub fn message_body(message: &str) -> MessageBody {
    MessageBody {
        message: message.to_string(),
    }
}
