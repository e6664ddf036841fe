mod creator_script_tests;
mod health_tests;
mod snapshot_tests;
