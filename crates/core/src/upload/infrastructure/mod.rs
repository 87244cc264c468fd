pub mod temp_staging;
