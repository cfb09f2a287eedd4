//! 基础设施层
//!
//! 持有稀缺资源（Page），向引擎暴露能力；
//! 引擎定义的 `DomDriver` 边界在这里落地为页面内执行的 JS

pub mod cdp_driver;
pub mod js_executor;
pub mod react_inspect;

pub use cdp_driver::CdpDomDriver;
pub use js_executor::JsExecutor;
