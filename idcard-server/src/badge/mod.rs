//! Badge Module
//!
//! 证卡生成管线：资源内联、HTML 模板构建、无头浏览器 PDF 渲染。
//!
//! - [`AssetResolver`] - 本地图片转 data URI
//! - [`build_badge_html`] - 纯函数，(成员, 设置, 模板) -> HTML
//! - [`BadgeRenderer`] - 每次调用独占一个无头浏览器进程

pub mod assets;
pub mod renderer;
pub mod template;

pub use assets::AssetResolver;
pub use renderer::BadgeRenderer;
pub use template::{CARD_HEIGHT_IN, CARD_WIDTH_IN, build_badge_html};
