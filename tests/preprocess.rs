use std::path::Path;

use image::{GrayImage, Luma};
use ohdr::dataset::idx::{parse_idx1, parse_idx3};
use ohdr::dataset::{preprocess, DatasetError, Split, CLASS_CODES, IMAGE_SIDE};

/// Writes `count` flat 128×128 PNGs into one class directory. Every pixel
/// of image `i` is `base + i`, so images are identifiable after packing.
fn write_class(dir: &Path, base: u8, count: usize) {
    std::fs::create_dir_all(dir).unwrap();
    for i in 0..count {
        let img = GrayImage::from_pixel(IMAGE_SIDE as u32, IMAGE_SIDE as u32, Luma([base + i as u8]));
        img.save(dir.join(format!("hsf_0_{:05}.png", i))).unwrap();
    }
}

fn class_base(digit: usize) -> u8 {
    (digit * 20 + 10) as u8
}

#[test]
fn train_split_packs_classes_contiguously_in_code_order() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("by_class");
    let out = tmp.path().join("nist_data");

    let counts = [2, 0, 3, 1, 1, 4, 2, 1, 3, 2];
    for (digit, code) in CLASS_CODES.iter().enumerate() {
        write_class(&Split::Train.class_dir(&root, code), class_base(digit), counts[digit]);
    }
    // Test-split images must not leak into the train array.
    write_class(&Split::Test.class_dir(&root, "30"), 250, 2);

    let summary = preprocess(&root, Split::Train, &out).unwrap();
    let total: usize = counts.iter().sum();
    assert_eq!(summary.total, total);
    assert_eq!(summary.images_path, out.join("train_images"));
    assert_eq!(summary.blocks.len(), 10);

    let bytes = std::fs::read(&summary.images_path).unwrap();
    let (header, pixels) = parse_idx3(&bytes).unwrap();
    assert_eq!((header.count, header.rows, header.cols), (total, 128, 128));
    assert_eq!(bytes.len(), 16 + total * 128 * 128);

    let label_bytes = std::fs::read(&summary.labels_path).unwrap();
    let labels = parse_idx1(&label_bytes).unwrap();
    assert_eq!(labels.len(), total);

    let image_len = IMAGE_SIDE * IMAGE_SIDE;
    let mut offset = 0;
    for (digit, block) in summary.blocks.iter().enumerate() {
        assert_eq!(block.code, CLASS_CODES[digit]);
        assert_eq!(block.digit as usize, digit);
        assert_eq!(block.range, offset..offset + counts[digit]);

        for (i, index) in block.range.clone().enumerate() {
            let image = &pixels[index * image_len..(index + 1) * image_len];
            let expected = class_base(digit) + i as u8;
            assert!(image.iter().all(|&p| p == expected), "image {index} of class {digit}");
            assert_eq!(labels[index] as usize, digit);
        }
        offset += counts[digit];
    }
}

#[test]
fn test_split_reads_hsf_4() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("by_class");
    for (digit, code) in CLASS_CODES.iter().enumerate() {
        write_class(&Split::Test.class_dir(&root, code), class_base(digit), 1);
    }

    let summary = preprocess(&root, Split::Test, tmp.path()).unwrap();
    assert_eq!(summary.total, 10);
    assert_eq!(summary.images_path, tmp.path().join("test_images"));
    assert_eq!(summary.labels_path, tmp.path().join("test_labels"));
}

#[test]
fn bad_image_aborts_but_keeps_finished_classes() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("by_class");
    let out = tmp.path().join("out");
    for (digit, code) in CLASS_CODES.iter().enumerate() {
        write_class(&Split::Train.class_dir(&root, code), class_base(digit), 1);
    }
    // Class 32 holds a file that is not an image.
    std::fs::write(Split::Train.class_dir(&root, "32").join("zz_broken.png"), b"not a png").unwrap();

    let err = preprocess(&root, Split::Train, &out).unwrap_err();
    assert!(matches!(err, DatasetError::Image { .. }));

    let bytes = std::fs::read(out.join("train_images")).unwrap();
    let (header, pixels) = parse_idx3(&bytes).unwrap();
    assert_eq!(header.count, 11);

    let image_len = IMAGE_SIDE * IMAGE_SIDE;
    assert!(pixels[..image_len].iter().all(|&p| p == class_base(0)));
    assert!(pixels[image_len..2 * image_len].iter().all(|&p| p == class_base(1)));
    assert!(pixels[2 * image_len..].iter().all(|&p| p == 0));
}

#[test]
fn missing_class_directory_fails_before_writing() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("by_class");
    let out = tmp.path().join("out");
    write_class(&Split::Train.class_dir(&root, "30"), 1, 1);

    let err = preprocess(&root, Split::Train, &out).unwrap_err();
    assert!(matches!(err, DatasetError::MissingClassDir(_)));
    assert!(!out.join("train_images").exists());
}
