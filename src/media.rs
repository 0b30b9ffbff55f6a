use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{AddEventListenerOptions, Document, Element, HtmlImageElement, HtmlVideoElement};

const VIDEO_MARKERS: [&str; 2] = [".mp4", ".webm"];

pub const VIDEO_FALLBACK_TEXT: &str = "Your browser does not support the video tag.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Picks the element type from the URL alone.
    pub fn sniff(url: &str) -> Self {
        let lower = url.to_ascii_lowercase();
        if VIDEO_MARKERS.iter().any(|m| lower.contains(m)) {
            MediaKind::Video
        } else {
            MediaKind::Image
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            MediaKind::Image => "img",
            MediaKind::Video => "video",
        }
    }

    /// Event that signals the element has finished loading.
    pub fn load_event(self) -> &'static str {
        match self {
            MediaKind::Image => "load",
            MediaKind::Video => "loadeddata",
        }
    }
}

/// Builds an `<img>` or `<video>` for `url`.
///
/// `on_loaded` runs once when the element reports load completion. The
/// listener goes on before `src` is assigned so the load can't be missed.
/// There is no error listener: a broken resource never calls `on_loaded`.
pub fn create_element(
    document: &Document,
    url: &str,
    on_loaded: impl FnOnce() + 'static,
) -> Result<Element, JsValue> {
    let kind = MediaKind::sniff(url);
    let element = document.create_element(kind.tag())?;
    if kind == MediaKind::Video {
        let video: &HtmlVideoElement = element.unchecked_ref();
        video.set_controls(true);
        video.set_text_content(Some(VIDEO_FALLBACK_TEXT));
    }

    let listener = Closure::once_into_js(move |_e: web_sys::Event| on_loaded());
    let options = AddEventListenerOptions::new();
    options.set_once(true);
    element.add_event_listener_with_callback_and_add_event_listener_options(
        kind.load_event(),
        listener.unchecked_ref(),
        &options,
    )?;

    match kind {
        MediaKind::Image => element.unchecked_ref::<HtmlImageElement>().set_src(url),
        MediaKind::Video => element.unchecked_ref::<HtmlVideoElement>().set_src(url),
    }
    Ok(element)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sniff_detects_video_markers() {
        assert_eq!(MediaKind::sniff("https://random.dog/x.mp4"), MediaKind::Video);
        assert_eq!(MediaKind::sniff("https://random.dog/x.WEBM"), MediaKind::Video);
        assert_eq!(MediaKind::sniff("https://h/clip.mp4?t=3"), MediaKind::Video);
        assert_eq!(MediaKind::sniff("https://cdn2.thecatapi.com/a.png"), MediaKind::Image);
        assert_eq!(MediaKind::sniff("https://picsum.photos/id/5/400/400"), MediaKind::Image);
        assert_eq!(MediaKind::sniff(""), MediaKind::Image);
    }

    #[test]
    fn load_signal_matches_element() {
        assert_eq!(MediaKind::Image.tag(), "img");
        assert_eq!(MediaKind::Image.load_event(), "load");
        assert_eq!(MediaKind::Video.tag(), "video");
        assert_eq!(MediaKind::Video.load_event(), "loadeddata");
    }
}
