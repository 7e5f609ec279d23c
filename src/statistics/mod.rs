//! Statistical building blocks shared by the analysis layer.
//!
//! - Descriptive statistics and group summaries
//! - Quantiles with linear interpolation
//! - Average ranks with tie bookkeeping
//! - Reference distribution tails (normal, Student's t, F)

mod descriptive;
mod distributions;
mod quantile;
mod ranks;

pub use descriptive::{mean, sum_of_squares, summarize, variance};
pub use distributions::{f_sf, normal_ppf, normal_sf, student_t_two_sided};
pub use quantile::{compute_quantile, median, quantile_sorted, sorted_copy};
pub use ranks::{rank_average, Ranking};
