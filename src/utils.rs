use std::env::var;

/// Get the value of ENV var, if it is set and not empty
pub fn env_var(var_name: &str) -> Option<String> {
    var(var_name).ok().filter(|value| !value.is_empty())
}

/// Get the value of ENV var, or a default
///
/// Only when:
/// - It is set
/// - It is not empty
pub fn env_var_or_else(var_name: &str, or_else: fn() -> String) -> String {
    env_var(var_name).unwrap_or_else(or_else)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_var_or_else() {
        #[allow(unsafe_code)]
        unsafe {
            std::env::set_var("TASKPAD_TEST_SET", "value");
            std::env::set_var("TASKPAD_TEST_EMPTY", "");
        }

        assert_eq!(Some("value".to_string()), env_var("TASKPAD_TEST_SET"));
        assert_eq!(None, env_var("TASKPAD_TEST_EMPTY"));
        assert_eq!(None, env_var("TASKPAD_TEST_UNSET"));

        assert_eq!(
            "fallback".to_string(),
            env_var_or_else("TASKPAD_TEST_EMPTY", || "fallback".to_string())
        );
        assert_eq!(
            "value".to_string(),
            env_var_or_else("TASKPAD_TEST_SET", || "fallback".to_string())
        );
    }
}
