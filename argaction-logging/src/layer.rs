//! Tracing layer rendering events through a [`Template`]

use crate::format::{LogRecord, Template};
use crate::sink::LogSink;
use chrono::Local;
use std::fmt;
use std::sync::{Mutex, PoisonError};
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::Layer;

/// Collects the event message and appends other fields as `key=value`
#[derive(Default)]
struct FieldVisitor {
    message: String,
    fields: Vec<String>,
}

impl FieldVisitor {
    fn finish(self) -> String {
        if self.fields.is_empty() {
            return self.message;
        }
        let fields = self.fields.join(" ");
        if self.message.is_empty() {
            fields
        } else {
            format!("{} {fields}", self.message)
        }
    }
}

impl Visit for FieldVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.push(format!("{}={value}", field.name()));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.fields.push(format!("{}={value:?}", field.name()));
        }
    }
}

/// Layer writing one rendered line per event to a [`LogSink`]
pub struct TemplateLayer {
    template: Template,
    sink: Mutex<Box<dyn LogSink>>,
}

impl TemplateLayer {
    pub fn new(template: Template, sink: Box<dyn LogSink>) -> Self {
        Self {
            template,
            sink: Mutex::new(sink),
        }
    }
}

impl<S> Layer<S> for TemplateLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        let message = visitor.finish();

        let metadata = event.metadata();
        let line = self.template.render(&LogRecord {
            time: Local::now(),
            target: metadata.target(),
            level: *metadata.level(),
            message: &message,
        });

        // A panic while another thread held the sink leaves it usable
        let mut sink = self.sink.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(error) = sink.emit(metadata.level(), &line) {
            eprintln!("failed to write log line: {error}");
        }
    }
}
