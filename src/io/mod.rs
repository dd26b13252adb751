/// CSV export of step records and turbine samples.
pub mod export;
