use image::{DynamicImage, Rgba, RgbaImage};
use pixform::{
    ConversionOptions, ConversionQueue, Converter, Delivery, ImageFormat, ItemStatus,
    DEFAULT_ARCHIVE_NAME,
};
use std::io::{Cursor, Read};

fn png_bytes(width: u32, height: u32, pixel: Rgba<u8>) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, pixel);
    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(img)
        .write_to(&mut buffer, image::ImageFormat::Png)
        .unwrap();
    buffer.into_inner()
}

#[test]
fn batch_records_failure_and_continues() {
    let mut queue = ConversionQueue::new();
    let good = queue.add_file("ok.png", png_bytes(4, 4, Rgba([1, 2, 3, 255])));
    let bad = queue.add_file("bad.bin", b"garbage".to_vec());

    let mut events = Vec::new();
    queue.convert_all(&ConversionOptions::default(), |completed, total| {
        events.push((completed, total));
    });

    assert_eq!(events, vec![(1, 2), (2, 2)]);
    assert_eq!(queue.progress(), (2, 2));
    assert!(!queue.is_converting());

    let good_item = queue.item(good).unwrap();
    assert_eq!(good_item.status, ItemStatus::Done);
    assert!(good_item.result.is_some());
    assert!(good_item.error.is_none());

    let bad_item = queue.item(bad).unwrap();
    assert_eq!(bad_item.status, ItemStatus::Error);
    assert!(bad_item.result.is_none());
    assert!(bad_item.error.is_some());
}

#[test]
fn completed_items_are_skipped_on_later_passes() {
    let mut queue = ConversionQueue::new();
    queue.add_file("a.png", png_bytes(4, 4, Rgba([0, 0, 0, 255])));
    let bad = queue.add_file("bad.bin", b"garbage".to_vec());

    queue.convert_all(&ConversionOptions::default(), |_, _| {});

    // Only the failed item re-enters the second pass.
    let mut events = Vec::new();
    queue.convert_all(&ConversionOptions::default(), |completed, total| {
        events.push((completed, total));
    });

    assert_eq!(events, vec![(1, 1)]);
    assert_eq!(queue.item(bad).unwrap().status, ItemStatus::Error);
}

#[test]
fn empty_and_all_done_passes_are_noops() {
    let mut queue = ConversionQueue::new();
    queue.convert_all(&ConversionOptions::default(), |_, _| {
        panic!("no items, no progress events");
    });

    queue.add_file("a.png", png_bytes(4, 4, Rgba([0, 0, 0, 255])));
    queue.convert_all(&ConversionOptions::default(), |_, _| {});
    queue.convert_all(&ConversionOptions::default(), |_, _| {
        panic!("everything already done");
    });
}

#[test]
fn previews_are_released_on_remove_and_clear() {
    let mut queue = ConversionQueue::new();
    let first = queue.add_file("a.png", png_bytes(2, 2, Rgba([0, 0, 0, 255])));
    let second = queue.add_file("b.png", png_bytes(2, 2, Rgba([0, 0, 0, 255])));

    assert_eq!(queue.preview_count(), 2);
    assert!(queue.preview_bytes(first).is_some());

    assert!(queue.remove(first));
    assert_eq!(queue.preview_count(), 1);
    assert!(queue.preview_bytes(first).is_none());
    assert!(!queue.remove(first));

    queue.clear();
    assert_eq!(queue.preview_count(), 0);
    assert!(queue.is_empty());
    assert_eq!(queue.progress(), (0, 0));
    assert!(queue.item(second).is_none());
}

#[test]
fn item_ids_are_unique_and_stable() {
    let mut queue = ConversionQueue::new();
    let first = queue.add_file("a.png", vec![0]);
    let second = queue.add_file("b.png", vec![0]);

    assert_ne!(first, second);
    assert_eq!(first.to_string(), "file-1");
    assert_eq!(second.to_string(), "file-2");

    // Ids keep counting after removal; no reuse.
    queue.remove(second);
    let third = queue.add_file("c.png", vec![0]);
    assert_eq!(third.to_string(), "file-3");
}

#[test]
fn single_result_is_delivered_directly() {
    let mut queue = ConversionQueue::new();
    let id = queue.add_file("only.png", png_bytes(4, 4, Rgba([9, 9, 9, 255])));
    queue.convert_all(&ConversionOptions::default(), |_, _| {});

    let delivery = queue.download_all().unwrap().unwrap();
    match &delivery {
        Delivery::Single { filename, bytes } => {
            assert_eq!(filename, "only.png");
            assert!(!bytes.is_empty());
        }
        Delivery::Archive { .. } => panic!("one result must not be archived"),
    }

    let single = queue.download_single(id).unwrap();
    assert_eq!(single.filename(), delivery.filename());
}

#[test]
fn multiple_results_are_delivered_as_zip() {
    let mut queue = ConversionQueue::new();
    queue.add_file("a.png", png_bytes(4, 4, Rgba([1, 1, 1, 255])));
    queue.add_file("b.png", png_bytes(4, 4, Rgba([2, 2, 2, 255])));
    queue.add_file("bad.bin", b"garbage".to_vec());
    queue.convert_all(&ConversionOptions::default(), |_, _| {});

    let delivery = queue.download_all().unwrap().unwrap();
    let Delivery::Archive { filename, bytes } = delivery else {
        panic!("two results must be archived");
    };
    assert_eq!(filename, DEFAULT_ARCHIVE_NAME);

    // The failed item is excluded; both successes are present and
    // their entries decode back to the converted bytes.
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    assert_eq!(archive.len(), 2);

    for name in ["a.png", "b.png"] {
        let mut entry = archive.by_name(name).unwrap();
        let mut contents = Vec::new();
        entry.read_to_end(&mut contents).unwrap();
        let decoded = image::load_from_memory(&contents).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (4, 4));
    }
}

#[test]
fn download_all_with_nothing_done_is_none() {
    let mut queue = ConversionQueue::new();
    queue.add_file("bad.bin", b"garbage".to_vec());
    queue.convert_all(&ConversionOptions::default(), |_, _| {});

    assert!(queue.download_all().unwrap().is_none());
    assert!(queue.download_single(queue.items()[0].id).is_none());
}

#[test]
fn convert_batch_is_ordered_and_stops_on_failure() {
    let converter = Converter::new(ConversionOptions {
        format: ImageFormat::Webp,
        ..Default::default()
    });

    let inputs = vec![
        (png_bytes(4, 4, Rgba([0, 0, 0, 255])), "a.png".to_string()),
        (png_bytes(4, 4, Rgba([0, 0, 0, 255])), "b.png".to_string()),
    ];

    let mut events = Vec::new();
    let results = converter
        .convert_batch(&inputs, |completed, total| events.push((completed, total)))
        .unwrap();

    assert_eq!(events, vec![(1, 2), (2, 2)]);
    assert_eq!(results[0].filename, "a.webp");
    assert_eq!(results[1].filename, "b.webp");

    let inputs = vec![
        (png_bytes(4, 4, Rgba([0, 0, 0, 255])), "a.png".to_string()),
        (b"garbage".to_vec(), "bad.bin".to_string()),
        (png_bytes(4, 4, Rgba([0, 0, 0, 255])), "c.png".to_string()),
    ];

    let mut events = Vec::new();
    let err = converter.convert_batch(&inputs, |completed, total| events.push((completed, total)));

    assert!(err.is_err());
    assert_eq!(events, vec![(1, 3)]);
}
