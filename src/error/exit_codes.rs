use crate::error::OsDetectorError;

pub fn get_exit_code(error: &OsDetectorError) -> i32 {
    match error {
        OsDetectorError::InvalidProperty(_)
        | OsDetectorError::ConfigError(_)
        | OsDetectorError::Config(_) => 2,

        OsDetectorError::UnknownOsName(_) | OsDetectorError::UnknownOsArch(_) => 3,

        OsDetectorError::IllegalState(_) => 70, // EX_SOFTWARE

        _ => 1,
    }
}
