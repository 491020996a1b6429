pub mod host_info;
pub mod params;
pub mod report;
pub mod results_table;
pub mod runtime_flavor;
pub mod transport;
