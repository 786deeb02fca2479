//! External collaborators: price history, macro context, news, fundamentals
//! and the recommendation policy.

pub mod fundamentals;
pub mod macro_context;
pub mod market_data;
pub mod news;
pub mod policy;

pub use fundamentals::{CompanyProfileProvider, YahooProfileProvider};
pub use macro_context::MacroContextFetcher;
pub use market_data::{CachedPriceProvider, PriceSeriesProvider, YahooChartProvider};
pub use news::{GoogleNewsProvider, NewsProvider};
pub use policy::{OpenAiPolicy, RecommendationPolicy};
