#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    use zune_psd_layers::zune_core::bytestream::ZCursor;
    let data = ZCursor::new(data);

    let mut decoder = zune_psd_layers::PsdLayerDecoder::new(data);
    if let Ok(document) = decoder.decode(true) {
        for layer in document.layers() {
            let _ = layer.image().to_rgba_interleaved();
        }
    }
});
