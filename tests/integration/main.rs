mod common;
mod config_json_test;
mod health_test;
