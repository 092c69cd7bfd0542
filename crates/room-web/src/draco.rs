//! Bindings to the browser Draco decoder (`draco_decoder.js` + wasm) served
//! from `DRACO_PATH`.

use room_core::constants::DRACO_PATH;
use room_core::import::{CompressedPrimitive, DecodeError};
use room_core::scene::MeshGeometry;
use room_core::MeshDecoder;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

const DECODER_SCRIPT: &str = "draco_decoder.js";

#[wasm_bindgen]
extern "C" {
    /// Module factory installed globally by the decoder script.
    #[wasm_bindgen(catch, js_name = DracoDecoderModule)]
    fn draco_decoder_module(config: &JsValue) -> Result<JsValue, JsValue>;

    type DracoModule;
    #[wasm_bindgen(method, getter, js_name = DT_FLOAT32)]
    fn dt_float32(this: &DracoModule) -> i32;
    #[wasm_bindgen(method, getter, js_name = HEAPF32)]
    fn heap_f32(this: &DracoModule) -> js_sys::Float32Array;
    #[wasm_bindgen(method, getter, js_name = HEAPU32)]
    fn heap_u32(this: &DracoModule) -> js_sys::Uint32Array;
    #[wasm_bindgen(method, js_name = _malloc)]
    fn malloc(this: &DracoModule, bytes: u32) -> u32;
    #[wasm_bindgen(method, js_name = _free)]
    fn free(this: &DracoModule, ptr: u32);
    #[wasm_bindgen(method)]
    fn destroy(this: &DracoModule, object: &JsValue);

    type Decoder;
    #[wasm_bindgen(method, js_name = DecodeArrayToMesh)]
    fn decode_array_to_mesh(
        this: &Decoder,
        data: &js_sys::Int8Array,
        size: u32,
        mesh: &DracoMesh,
    ) -> Status;
    #[wasm_bindgen(method, js_name = GetAttributeByUniqueId)]
    fn attribute_by_unique_id(this: &Decoder, mesh: &DracoMesh, id: u32) -> Attribute;
    #[wasm_bindgen(method, js_name = GetAttributeDataArrayForAllPoints)]
    fn attribute_data_for_all_points(
        this: &Decoder,
        mesh: &DracoMesh,
        attribute: &Attribute,
        data_type: i32,
        bytes: u32,
        ptr: u32,
    ) -> bool;
    #[wasm_bindgen(method, js_name = GetTrianglesUInt32Array)]
    fn triangles_u32(this: &Decoder, mesh: &DracoMesh, bytes: u32, ptr: u32) -> bool;

    type DracoMesh;
    #[wasm_bindgen(method)]
    fn num_points(this: &DracoMesh) -> u32;
    #[wasm_bindgen(method)]
    fn num_faces(this: &DracoMesh) -> u32;

    type Attribute;
    #[wasm_bindgen(method)]
    fn num_components(this: &Attribute) -> u32;
    /// Address of the wrapped native object; 0 when the lookup failed.
    #[wasm_bindgen(method, getter)]
    fn ptr(this: &Attribute) -> u32;

    type Status;
    #[wasm_bindgen(method)]
    fn ok(this: &Status) -> bool;
    #[wasm_bindgen(method)]
    fn error_msg(this: &Status) -> String;
}

pub struct DracoDecoder {
    module: DracoModule,
}

impl DracoDecoder {
    /// Inject the decoder script and wait for its wasm module to initialize.
    pub async fn load(document: &web::Document) -> anyhow::Result<Self> {
        let src = format!("{}{}", DRACO_PATH, DECODER_SCRIPT);
        load_script(document, &src).await?;
        let wrapped = JsFuture::from(instantiate())
            .await
            .map_err(|e| anyhow::anyhow!("Draco module failed to start: {:?}", e))?;
        let module = js_sys::Array::from(&wrapped)
            .get(0)
            .unchecked_into::<DracoModule>();
        log::info!("[load] Draco decoder ready");
        Ok(Self { module })
    }

    fn construct<T: JsCast>(&self, class: &str) -> Result<T, DecodeError> {
        let ctor: js_sys::Function = js_sys::Reflect::get(&self.module, &JsValue::from_str(class))
            .ok()
            .and_then(|c| c.dyn_into().ok())
            .ok_or_else(|| DecodeError(format!("Draco module has no {}", class)))?;
        js_sys::Reflect::construct(&ctor, &js_sys::Array::new())
            .map(|obj| obj.unchecked_into::<T>())
            .map_err(|e| DecodeError(format!("{:?}", e)))
    }

    fn decode_mesh(
        &self,
        decoder: &Decoder,
        mesh: &DracoMesh,
        p: &CompressedPrimitive<'_>,
    ) -> Result<MeshGeometry, DecodeError> {
        let data = js_sys::Int8Array::from(bytemuck::cast_slice::<u8, i8>(p.data));
        let status = decoder.decode_array_to_mesh(&data, p.data.len() as u32, mesh);
        if !status.ok() {
            return Err(DecodeError(status.error_msg()));
        }

        let positions = self
            .read_floats(decoder, mesh, p.position_id, 3)?
            .chunks_exact(3)
            .map(|c| [c[0], c[1], c[2]])
            .collect();
        let uvs = match p.uv_id {
            Some(id) => self
                .read_floats(decoder, mesh, id, 2)?
                .chunks_exact(2)
                .map(|c| [c[0], c[1]])
                .collect(),
            None => Vec::new(),
        };
        Ok(MeshGeometry {
            positions,
            uvs,
            indices: self.read_indices(decoder, mesh)?,
        })
    }

    fn read_floats(
        &self,
        decoder: &Decoder,
        mesh: &DracoMesh,
        id: u32,
        components: u32,
    ) -> Result<Vec<f32>, DecodeError> {
        let attribute = decoder.attribute_by_unique_id(mesh, id);
        if attribute.ptr() == 0 {
            return Err(DecodeError(format!("attribute {} not found", id)));
        }
        if attribute.num_components() != components {
            return Err(DecodeError(format!(
                "attribute {} has {} components, expected {}",
                id,
                attribute.num_components(),
                components
            )));
        }
        let len = mesh.num_points() * components;
        let bytes = len * 4;
        let ptr = self.module.malloc(bytes);
        let ok = decoder.attribute_data_for_all_points(
            mesh,
            &attribute,
            self.module.dt_float32(),
            bytes,
            ptr,
        );
        // Read the heap view after the call; decoding may have grown memory.
        let start = ptr / 4;
        let values = self.module.heap_f32().subarray(start, start + len).to_vec();
        self.module.free(ptr);
        if !ok {
            return Err(DecodeError(format!("attribute {} could not be read", id)));
        }
        Ok(values)
    }

    fn read_indices(&self, decoder: &Decoder, mesh: &DracoMesh) -> Result<Vec<u32>, DecodeError> {
        let len = mesh.num_faces() * 3;
        let bytes = len * 4;
        let ptr = self.module.malloc(bytes);
        let ok = decoder.triangles_u32(mesh, bytes, ptr);
        let start = ptr / 4;
        let indices = self.module.heap_u32().subarray(start, start + len).to_vec();
        self.module.free(ptr);
        if !ok {
            return Err(DecodeError("triangle indices could not be read".to_string()));
        }
        Ok(indices)
    }
}

impl MeshDecoder for DracoDecoder {
    fn decode(&mut self, p: &CompressedPrimitive<'_>) -> Result<MeshGeometry, DecodeError> {
        let decoder: Decoder = self.construct("Decoder")?;
        let mesh: DracoMesh = match self.construct("Mesh") {
            Ok(m) => m,
            Err(e) => {
                self.module.destroy(&decoder);
                return Err(e);
            }
        };
        let out = self.decode_mesh(&decoder, &mesh, p);
        self.module.destroy(&mesh);
        self.module.destroy(&decoder);
        out
    }
}

/// Call the module factory. The module is resolved wrapped in an array
/// because the module object is itself thenable.
fn instantiate() -> js_sys::Promise {
    js_sys::Promise::new(&mut |resolve, reject| {
        let config = js_sys::Object::new();
        let locate = Closure::<dyn Fn(String) -> String>::new(|file: String| {
            format!("{}{}", DRACO_PATH, file)
        });
        let _ = js_sys::Reflect::set(&config, &"locateFile".into(), locate.as_ref());
        locate.forget();

        let loaded = Closure::once_into_js(move |module: JsValue| {
            let _ = resolve.call1(&JsValue::NULL, &js_sys::Array::of1(&module));
        });
        let _ = js_sys::Reflect::set(&config, &"onModuleLoaded".into(), &loaded);

        if let Err(e) = draco_decoder_module(&config) {
            let _ = reject.call1(&JsValue::NULL, &e);
        }
    })
}

async fn load_script(document: &web::Document, src: &str) -> anyhow::Result<()> {
    let script: web::HtmlScriptElement = document
        .create_element("script")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    script.set_src(src);
    let done = js_sys::Promise::new(&mut |resolve, reject| {
        script.set_onload(Some(&resolve));
        script.set_onerror(Some(&reject));
    });
    let head = document
        .head()
        .ok_or_else(|| anyhow::anyhow!("document has no <head>"))?;
    head.append_child(&script)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    JsFuture::from(done)
        .await
        .map_err(|_| anyhow::anyhow!("failed to load {}", src))?;
    Ok(())
}
