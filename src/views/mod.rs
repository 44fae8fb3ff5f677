//! Handlebars-шаблоны серверных страниц.
//!
//! Текст подставляется через `{{...}}` и экранируется самим handlebars.

use handlebars::Handlebars;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use crate::error::ViewError;
use crate::models::Event;

mod templates;

use templates::{EVENT_PAGE_TEMPLATE, NOT_FOUND_TEMPLATE};

const EVENT_PAGE: &str = "event_page";
const NOT_FOUND: &str = "not_found";

#[derive(Clone)]
pub struct TemplateEngine {
    handlebars: Arc<Handlebars<'static>>,
}

impl TemplateEngine {
    pub fn new() -> Result<Self, ViewError> {
        let mut handlebars = Handlebars::new();
        // Поле, которого нет в данных, - ошибка рендера, а не пустая строка
        handlebars.set_strict_mode(true);

        handlebars
            .register_template_string(EVENT_PAGE, EVENT_PAGE_TEMPLATE)
            .map_err(|e| ViewError::Template(format!("Failed to register {}: {}", EVENT_PAGE, e)))?;
        handlebars
            .register_template_string(NOT_FOUND, NOT_FOUND_TEMPLATE)
            .map_err(|e| ViewError::Template(format!("Failed to register {}: {}", NOT_FOUND, e)))?;

        Ok(Self {
            handlebars: Arc::new(handlebars),
        })
    }

    pub fn render_event_page(&self, event: &Event) -> Result<String, ViewError> {
        debug!(slug = %event.slug, "Rendering event page");
        self.render(EVENT_PAGE, event)
    }

    pub fn render_not_found_page(&self) -> Result<String, ViewError> {
        self.render(NOT_FOUND, &serde_json::json!({}))
    }

    fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String, ViewError> {
        Ok(self.handlebars.render(name, data)?)
    }
}
