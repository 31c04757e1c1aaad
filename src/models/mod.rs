mod account;
mod comment;
mod portfolio;
mod stock;
mod user;

pub use account::{LoginRequest, NewUserResponse, RegisterRequest};
pub use comment::{Comment, CommentResponse, CreateCommentRequest, UpdateCommentRequest};
pub use portfolio::{AddPortfolioRequest, PortfolioMembership};
pub use stock::{Stock, StockQuery, StockResponse, UpsertStockRequest};
pub use user::User;
