pub const APP_NAME: &str = "Javitor (Java Editor)";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const AUTHOR_NAME: &str = "hmaniac28";
pub const AUTHOR_EMAIL: &str = "hmaniac28@yahoo.de";

pub const MSG_UNSAVED_CHANGES_TITLE: &str = "Unsaved Changes";
pub const MSG_UNSAVED_CHANGES: &str =
    "You have unsaved changes. Do you want to save before continuing?";
pub const MSG_FILE_READ_ERROR_TITLE: &str = "Error Reading File";
pub const MSG_FILE_READ_ERROR: &str = "An error occurred while reading the file: ";
pub const MSG_FILE_WRITE_ERROR_TITLE: &str = "Error Saving File";
pub const MSG_FILE_WRITE_ERROR: &str = "An error occurred while saving the file: ";
pub const MSG_SEARCH_ERROR_TITLE: &str = "Error Searching";
pub const MSG_SEARCH_ERROR: &str = "The search text could not be used: ";
pub const MSG_SEARCH_NOT_FOUND: &str = "Could not find: ";
pub const MSG_SEARCH_EMPTY: &str = "Enter text to find";
