use super::*;

fn scratch(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_output").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn leftovers(dir: &Path) -> Vec<String> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|n| n.ends_with(".tmp"))
        .collect()
}

#[test]
fn save_creates_parent_and_leaves_no_temp_files() {
    let dir = scratch("save_ok");
    let out = dir.join("nested").join("a.png");
    let img = image::RgbaImage::from_pixel(3, 2, image::Rgba([1, 2, 3, 4]));
    save_rgba_atomic(&out, &img).unwrap();

    let back = image::open(&out).unwrap().to_rgba8();
    assert_eq!(back, img);
    assert!(leftovers(&dir.join("nested")).is_empty());
}

#[test]
fn failed_write_keeps_previous_file_and_cleans_up() {
    let dir = scratch("save_fail");
    let out = dir.join("keep.png");
    std::fs::write(&out, b"previous").unwrap();

    let err = write_atomically(&out, |tmp| {
        std::fs::write(tmp, b"half").unwrap();
        Err(HeatError::data("encoder exploded"))
    })
    .unwrap_err();
    assert!(err.to_string().contains("encoder exploded"));
    assert_eq!(std::fs::read(&out).unwrap(), b"previous");
    assert!(leftovers(&dir).is_empty());
}

#[test]
fn unknown_extension_is_an_invalid_parameter() {
    let err = image_format_for(Path::new("heat.notanimage")).unwrap_err();
    assert!(matches!(err, HeatError::InvalidParameter(_)));
    assert_eq!(
        image_format_for(Path::new("x/heat.PNG")).unwrap(),
        image::ImageFormat::Png
    );
}

#[test]
fn temp_sibling_is_hidden_next_to_target() {
    let tmp = temp_sibling(Path::new("out/dir/frame.png"));
    assert_eq!(tmp.parent(), Some(Path::new("out/dir")));
    let name = tmp.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with(".frame.png."));
    assert!(name.ends_with(".tmp"));
}
