//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_edutasks_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum EduTasksError {
            $($variant(String),)*
        }

        impl EduTasksError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(EduTasksError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(EduTasksError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(EduTasksError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl EduTasksError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        EduTasksError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_edutasks_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    FileOperation("E004", "File Operation Error"),
    Validation("E005", "Validation Error"),
    NotFound("E006", "Resource Not Found"),
    Serialization("E007", "Serialization Error"),
    DateParse("E008", "Date Parse Error"),
    Authentication("E009", "Authentication Error"),
    Authorization("E010", "Authorization Error"),
}

impl EduTasksError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for EduTasksError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for EduTasksError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for EduTasksError {
    fn from(err: sea_orm::DbErr) -> Self {
        EduTasksError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for EduTasksError {
    fn from(err: std::io::Error) -> Self {
        EduTasksError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for EduTasksError {
    fn from(err: serde_json::Error) -> Self {
        EduTasksError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for EduTasksError {
    fn from(err: chrono::ParseError) -> Self {
        EduTasksError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EduTasksError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(EduTasksError::database_config("test").code(), "E001");
        assert_eq!(EduTasksError::validation("test").code(), "E005");
        assert_eq!(EduTasksError::not_found("test").code(), "E006");
        assert_eq!(EduTasksError::authentication("test").code(), "E009");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            EduTasksError::database_operation("test").error_type(),
            "Database Operation Error"
        );
        assert_eq!(
            EduTasksError::authorization("test").error_type(),
            "Authorization Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = EduTasksError::validation("Invalid input");
        assert_eq!(err.message(), "Invalid input");
    }

    #[test]
    fn test_format_simple() {
        let err = EduTasksError::not_found("Course 42 does not exist");
        let formatted = err.format_simple();
        assert!(formatted.contains("Resource Not Found"));
        assert!(formatted.contains("Course 42"));
    }
}
