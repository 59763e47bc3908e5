//! Core module containing the request types, error taxonomy and shaping logic

pub mod error;
pub mod query;
pub mod resource;
pub mod response;
pub mod shape;

pub use error::{ParamError, ProxyError, ProxyResult};
pub use query::{ProxyQuery, QueryParams};
pub use resource::ResourceType;
pub use response::{ApiResponse, CollectionMeta, ItemMeta, ItemWithRelated, ProxyResponse};
pub use shape::SortSpec;
