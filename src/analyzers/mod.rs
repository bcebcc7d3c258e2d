pub mod rental_analyzer;
pub mod summary;

pub use rental_analyzer::{
    mean, monthly_summary, pearson, HourlyAverage, HourlyTrends, MonthlyAverage, RentalAnalyzer,
    TemperatureBand, TemperatureEffect, TemperaturePoint, WeatherDrop, WeatherGroup, WeatherImpact,
};
pub use summary::{describe, describe_summary, head, histogram, ColumnSummary, Histogram};
