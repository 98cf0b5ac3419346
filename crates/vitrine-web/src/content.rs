use crate::constants::{CMS_KEY_ATTR, CMS_PHOTO_ATTR, CONTENT_URL, PHOTOS_URL};
use crate::keys::parse_photo_slot;
use anyhow::{anyhow, bail};
use fnv::FnvHashMap;
use vitrine_core::{select_photos, ContentMap, ContentView, Photo};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

async fn fetch_text(url: &str) -> anyhow::Result<String> {
    let window = web::window().ok_or_else(|| anyhow!("no window"))?;
    let response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| anyhow!("fetch {}: {:?}", url, e))?;
    let response: web::Response = response
        .dyn_into()
        .map_err(|e| anyhow!("fetch {}: not a Response: {:?}", url, e))?;
    if !response.ok() {
        bail!("fetch {}: HTTP {}", url, response.status());
    }
    let body: js_sys::Promise = response
        .text()
        .map_err(|e| anyhow!("fetch {}: {:?}", url, e))?;
    let text = JsFuture::from(body)
        .await
        .map_err(|e| anyhow!("fetch {}: {:?}", url, e))?;
    text.as_string()
        .ok_or_else(|| anyhow!("fetch {}: body is not text", url))
}

pub async fn fetch_content() -> anyhow::Result<ContentMap> {
    Ok(serde_json::from_str(&fetch_text(CONTENT_URL).await?)?)
}

pub async fn fetch_photos() -> anyhow::Result<Vec<Photo>> {
    Ok(serde_json::from_str(&fetch_text(PHOTOS_URL).await?)?)
}

fn each_element(document: &web::Document, selector: &str, mut f: impl FnMut(web::Element)) {
    let Ok(nodes) = document.query_selector_all(selector) else {
        return;
    };
    for i in 0..nodes.length() {
        if let Some(el) = nodes.item(i).and_then(|n| n.dyn_into::<web::Element>().ok()) {
            f(el);
        }
    }
}

/// Replace marked text with service copy; the markup text is the fallback.
pub fn apply_content(document: &web::Document, view: &ContentView) {
    each_element(document, &format!("[{}]", CMS_KEY_ATTR), |el| {
        let Some(key) = el.get_attribute(CMS_KEY_ATTR) else {
            return;
        };
        let fallback = el.text_content().unwrap_or_default();
        let text = view.text(&key, &fallback).to_string();
        if text != fallback {
            el.set_text_content(Some(&text));
        }
    });
}

/// Fill `<img data-cms-photo="section:slot">` slots. Sections without photos
/// keep the images already in the markup.
pub fn apply_photos(document: &web::Document, photos: Option<&[Photo]>) {
    let mut by_section: FnvHashMap<String, Vec<Photo>> = FnvHashMap::default();
    each_element(document, &format!("[{}]", CMS_PHOTO_ATTR), |el| {
        let Some(attr) = el.get_attribute(CMS_PHOTO_ATTR) else {
            return;
        };
        let Some((section, slot)) = parse_photo_slot(&attr) else {
            log::warn!("[content] bad photo slot '{}'", attr);
            return;
        };
        let chosen = by_section
            .entry(section.to_string())
            .or_insert_with(|| select_photos(photos, section, &[]));
        let (Some(photo), Some(img)) = (chosen.get(slot), el.dyn_ref::<web::HtmlImageElement>())
        else {
            return;
        };
        img.set_src(&photo.src);
        let alt = photo.alt.as_deref().or(photo.title.as_deref()).unwrap_or("");
        img.set_alt(alt);
    });
}

/// Fetch both resources and apply them; failures fall back to the markup.
pub async fn load_and_apply(document: web::Document) {
    let view = match fetch_content().await {
        Ok(map) => ContentView::new(Some(map)),
        Err(e) => {
            log::warn!("[content] using built-in copy: {:?}", e);
            ContentView::new(None)
        }
    };
    apply_content(&document, &view);

    let photos = match fetch_photos().await {
        Ok(photos) => Some(photos),
        Err(e) => {
            log::warn!("[content] using built-in photos: {:?}", e);
            None
        }
    };
    apply_photos(&document, photos.as_deref());
}
