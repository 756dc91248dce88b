mod dev_prod_tests;
mod preset_tests;
