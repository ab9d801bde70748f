use tokio::sync::oneshot;
use valu3::value::Value;

#[derive(Debug, Clone)]
pub struct ModuleResponse {
    pub error: Option<String>,
    pub data: Value,
}

impl From<Value> for ModuleResponse {
    fn from(data: Value) -> Self {
        Self { error: None, data }
    }
}

impl ModuleResponse {
    pub fn from_error(error: String) -> Self {
        Self {
            error: Some(error),
            data: Value::Null,
        }
    }

    pub fn from_success(value: Value) -> Self {
        Self {
            error: None,
            data: value,
        }
    }
}

/// One node invocation: the resolved input and the oneshot the module
/// answers through.
#[derive(Debug)]
pub struct ModulePackage {
    pub input: Option<Value>,
    pub sender: oneshot::Sender<ModuleResponse>,
}

impl ModulePackage {
    pub fn input(&self) -> Option<Value> {
        self.input.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_response_from_value() {
        let response: ModuleResponse = Value::from("ok").into();
        assert!(response.error.is_none());
        assert_eq!(response.data, Value::from("ok"));
    }

    #[test]
    fn test_module_response_from_error() {
        let response = ModuleResponse::from_error("boom".to_string());
        assert_eq!(response.error, Some("boom".to_string()));
        assert_eq!(response.data, Value::Null);
    }

    #[test]
    fn test_module_package_input_clone() {
        let (tx, _rx) = oneshot::channel();
        let package = ModulePackage {
            input: Some(Value::from("payload")),
            sender: tx,
        };

        assert_eq!(package.input(), Some(Value::from("payload")));
        assert_eq!(package.input(), Some(Value::from("payload")));
    }
}
