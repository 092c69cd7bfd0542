use crate::draco::DracoDecoder;
use crate::overlay;
use crate::render::GpuState;
use room_core::constants::{DEFAULT_MAX_ANISOTROPY, MODEL_PATH};
use room_core::loading::{AssetState, LoadProgress};
use room_core::{import_glb, import_glb_with, Room, SceneGraph, TextureId};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

pub type SharedGpu = Rc<RefCell<Option<GpuState<'static>>>>;

#[derive(Clone)]
pub struct LoadWiring {
    pub window: web::Window,
    pub document: web::Document,
    pub room: Rc<RefCell<Room>>,
    pub gpu: SharedGpu,
    pub progress: Rc<RefCell<LoadProgress>>,
}

impl LoadWiring {
    fn settle(&self, ok: bool) {
        let (percent, done) = {
            let mut p = self.progress.borrow_mut();
            (p.settle(ok), p.is_complete())
        };
        log::info!("[load] {:.0}%", percent);
        overlay::set_progress(&self.document, percent);
        if done {
            let p = *self.progress.borrow();
            log::info!("[load] complete ({} failed of {})", p.failed, p.total);
            overlay::finish(&self.document);
        }
    }
}

pub async fn fetch_bytes(window: &web::Window, path: &str) -> anyhow::Result<Vec<u8>> {
    let resp: web::Response = JsFuture::from(window.fetch_with_str(path))
        .await
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    if !resp.ok() {
        anyhow::bail!("GET {} returned {}", path, resp.status());
    }
    let buf = JsFuture::from(resp.array_buffer().map_err(|e| anyhow::anyhow!("{:?}", e))?)
        .await
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(js_sys::Uint8Array::new(&buf).to_vec())
}

/// Fetch the model and import it, decoding compressed geometry when the
/// Draco decoder comes up.
async fn fetch_model(w: &LoadWiring) -> anyhow::Result<SceneGraph> {
    let bytes = fetch_bytes(&w.window, MODEL_PATH).await?;
    let scene = match DracoDecoder::load(&w.document).await {
        Ok(mut draco) => import_glb_with(&bytes, &mut draco)?,
        Err(e) => {
            log::error!("[load] Draco decoder unavailable: {}", e);
            import_glb(&bytes)?
        }
    };
    Ok(scene)
}

async fn decode_image(
    window: &web::Window,
    bytes: &[u8],
    mime_type: &str,
) -> anyhow::Result<web::ImageBitmap> {
    let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(bytes));
    let bag = web::BlobPropertyBag::new();
    bag.set_type(mime_type);
    let blob = web::Blob::new_with_u8_array_sequence_and_options(&parts, &bag)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let promise = window
        .create_image_bitmap_with_blob(&blob)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    JsFuture::from(promise)
        .await
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))
}

/// Load the room model, classify it, and stream its textures to the GPU.
/// Each texture settles independently; failures only leave surfaces untextured.
pub async fn load_room(w: LoadWiring) {
    w.progress.borrow_mut().register(1);
    let scene = match AssetState::from(fetch_model(&w).await) {
        AssetState::Ready(scene) => scene,
        state => {
            if let AssetState::Failed(reason) = &state {
                log::error!("[load] {} failed: {}", MODEL_PATH, reason);
            }
            w.settle(false);
            return;
        }
    };

    let pending_images: Vec<_> = {
        let mut room = w.room.borrow_mut();
        room.install_scene(scene, DEFAULT_MAX_ANISOTROPY);
        if let Some(gpu) = w.gpu.borrow_mut().as_mut() {
            gpu.upload_scene(&room.scene);
        }
        room.scene
            .images
            .iter_mut()
            .enumerate()
            .filter(|(_, img)| !img.bytes.is_empty())
            .map(|(i, img)| {
                (
                    TextureId(i as u32),
                    std::mem::take(&mut img.bytes),
                    img.mime_type.clone(),
                    img.sampling,
                )
            })
            .collect()
    };
    w.progress
        .borrow_mut()
        .register(pending_images.len() as u32);
    w.settle(true);

    for (id, bytes, mime, sampling) in pending_images {
        let w = w.clone();
        spawn_local(async move {
            match decode_image(&w.window, &bytes, &mime).await {
                Ok(bitmap) => {
                    if let Some(gpu) = w.gpu.borrow_mut().as_mut() {
                        gpu.set_image(id, &bitmap, sampling);
                    }
                    bitmap.close();
                    w.settle(true);
                }
                Err(e) => {
                    log::error!("[load] texture {} failed: {}", id.0, e);
                    w.settle(false);
                }
            }
        });
    }
}
