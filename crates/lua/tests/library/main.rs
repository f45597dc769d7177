mod copy_tests;
mod scenario_tests;
