//! Alert banners for success, error and progress messages. Text is inserted as a
//! text node, never as markup, because it can carry server and platform messages.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Supported alert styles.
pub enum AlertKind {
    Error,
    Success,
    Info,
}

impl AlertKind {
    /// CSS class applied to the banner.
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Success => "success",
            Self::Info => "info",
        }
    }

    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            Self::Error => "❌",
            Self::Success => "✅",
            Self::Info => "ℹ️",
        }
    }

    /// Banner text: icon followed by the message.
    #[must_use]
    pub fn decorate(self, message: &str) -> String {
        format!("{} {message}", self.icon())
    }
}

/// Replaces the container's content with a single styled banner.
#[cfg(target_arch = "wasm32")]
pub fn render_alert(
    container: &web_sys::Element,
    kind: AlertKind,
    message: &str,
) -> Result<(), crate::app_lib::AppError> {
    use crate::app_lib::AppError;

    let document = container
        .owner_document()
        .ok_or_else(|| AppError::Config("Document not found".into()))?;
    let banner = document
        .create_element("div")
        .map_err(|_| AppError::Config("Failed to create alert".into()))?;
    banner.set_class_name(kind.class());
    banner
        .set_attribute("role", "alert")
        .map_err(|_| AppError::Config("Failed to set alert role".into()))?;
    banner.set_text_content(Some(&kind.decorate(message)));

    container.set_text_content(None);
    container
        .append_child(&banner)
        .map(|_| ())
        .map_err(|_| AppError::Config("Failed to attach alert".into()))
}

#[cfg(test)]
mod tests {
    use super::AlertKind;

    #[test]
    fn decorate_prefixes_icon() {
        assert_eq!(AlertKind::Success.decorate("done"), "✅ done");
        assert_eq!(AlertKind::Error.decorate("failed"), "❌ failed");
        assert_eq!(AlertKind::Info.decorate("working"), "ℹ️ working");
    }

    #[test]
    fn class_matches_kind() {
        assert_eq!(AlertKind::Success.class(), "success");
        assert_eq!(AlertKind::Error.class(), "error");
        assert_eq!(AlertKind::Info.class(), "info");
    }
}
