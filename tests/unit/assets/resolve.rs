use std::io::Cursor;

use super::*;

fn png_bytes() -> Vec<u8> {
    let img = image::RgbaImage::from_raw(2, 3, vec![255u8; 2 * 3 * 4]).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn data_url_round_trips_through_base64() {
    let encoded = base64::engine::general_purpose::STANDARD.encode(png_bytes());
    let href = format!("data:image/png;base64,{encoded}");
    let img = DataUrlResolver.resolve(&href).unwrap();
    assert_eq!((img.width, img.height), (2, 3));
}

#[test]
fn data_url_payload_may_wrap_lines() {
    let encoded = base64::engine::general_purpose::STANDARD.encode(b"hello");
    let wrapped = format!("data:text/plain;base64,{}\n  {}", &encoded[..4], &encoded[4..]);
    assert_eq!(decode_data_url(&wrapped).unwrap(), b"hello");
    assert_eq!(decode_data_url("data:,plain").unwrap(), b"plain");
}

#[test]
fn plain_data_url_payload_is_percent_decoded() {
    assert_eq!(decode_data_url("data:,a%20b%2Cc").unwrap(), b"a b,c");

    let escaped: String = png_bytes().iter().map(|b| format!("%{b:02X}")).collect();
    let img = DataUrlResolver
        .resolve(&format!("data:image/png,{escaped}"))
        .unwrap();
    assert_eq!((img.width, img.height), (2, 3));
}

#[test]
fn malformed_data_urls_fail() {
    assert!(decode_data_url("image.png").is_err());
    assert!(decode_data_url("data:image/png;base64").is_err());
    assert!(decode_data_url("data:image/png;base64,@@@").is_err());
    assert!(DataUrlResolver.resolve("photo.png").is_err());
}

#[test]
fn file_resolver_reads_relative_paths() {
    let dir = std::env::temp_dir().join(format!("svgscene-resolve-{}", std::process::id()));
    std::fs::create_dir_all(dir.join("img")).unwrap();
    std::fs::write(dir.join("img/a.png"), png_bytes()).unwrap();

    let resolver = FileResolver::new(&dir);
    let img = resolver.resolve("./img/a.png").unwrap();
    assert_eq!((img.width, img.height), (2, 3));
    assert!(resolver.resolve("img/missing.png").is_err());
    assert!(resolver.resolve("../a.png").is_err());

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn normalize_rel_path_rules() {
    assert_eq!(normalize_rel_path("a/./b\\c.png").unwrap(), "a/b/c.png");
    assert!(normalize_rel_path("/etc/passwd").is_err());
    assert!(normalize_rel_path("./").is_err());
}
