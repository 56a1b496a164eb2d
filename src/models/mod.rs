pub mod bmkg_forecast;
pub mod decision;
pub mod forecast;
