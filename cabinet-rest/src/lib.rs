//! PostgREST query shim.
//!
//! Build a query with [`QueryBuilder`], freeze it with
//! [`build`](QueryBuilder::build), and run it with [`RestClient::execute`].
//! Results are a uniform [`QueryResult`]: rows or an error, never both.
//!
//! ```no_run
//! use cabinet_rest::{OrderOptions, RestClient, RestConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = RestClient::new(&RestConfig::new("https://project.example.co", "anon-key"))?;
//! let request = client
//!     .from("ministres")
//!     .select("id, nom, prenom")
//!     .order_by("rang", OrderOptions::asc().nulls_last())
//!     .build();
//! let ministers = client.execute(&request).await?;
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod client;
pub mod config;
pub mod error;
pub mod payload;
pub mod query;

pub use backend::{
    HttpBackend, HttpMethod, HttpRequest, HttpResponse, MockBackend, ReqwestBackend,
};
pub use client::RestClient;
pub use config::RestConfig;
pub use error::{ClientError, ErrorInfo, RestError, TransportError};
pub use payload::{Payload, QueryResult};
pub use query::{Filter, IntoInList, OrderDirective, OrderOptions, QueryBuilder, QueryRequest};
