// アプリケーション層モジュール
pub mod api_response;
pub mod crew_api_handler;
pub mod crew_request;
pub mod crew_route;
pub mod queue_consumer;

// 再エクスポート
pub use api_response::ApiResponse;
pub use crew_api_handler::{CrewApiError, CrewApiHandler};
pub use crew_request::CrewRequest;
pub use crew_route::{CrewRoute, RouteError};
pub use queue_consumer::{BatchSummary, ConsumerError, MessageOutcome, QueueConsumer};
