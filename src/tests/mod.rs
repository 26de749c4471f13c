mod cors;
mod invalid_json;
mod login;
mod users;
