//! Fuzz target for picture serialization.
//!
//! Any snapshot that parses is serialized the way an export would, without
//! touching the file system. NaN, infinite and huge coordinates, degenerate
//! transforms and odd line breaks all have to come out as text, not panics.

#![no_main]

use libfuzzer_sys::fuzz_target;
use texoverlay::fonts::FontCatalog;
use texoverlay::ir::io_json::from_json_slice;
use texoverlay::picture::{serialize_text_frame, PictureDocument, PictureFrame, PictureHeader};

fuzz_target!(|data: &[u8]| {
    if data.len() > 1024 * 1024 {
        return;
    }

    let Ok(drawing) = from_json_slice(data) else {
        return;
    };

    for layer in &drawing.layers {
        let frame = PictureFrame::new(
            drawing.graphical_bounds,
            layer.eligible_frames().map(|(_, f)| f.anchor),
            drawing.ruler_origin,
        );
        let mut document = PictureDocument::new(PictureHeader {
            source: drawing.path.display().to_string(),
            tex_name: "fuzz.tex".to_string(),
            graphics_name: drawing.name.clone(),
            frame,
            crop_box: drawing.crop_box,
            page_origin: drawing.page_origin,
        });
        let mut fonts = FontCatalog::new();
        for (index, text) in layer.eligible_frames() {
            document.push_record(&serialize_text_frame(index, text, &frame, &mut fonts));
        }
        let _ = document.render();
        let _ = fonts.finalize();
    }
});
