use retrotext::batch::convert_all;
use retrotext::{Mode, Options};

fn with_sauce(art: &[u8], title: &str) -> Vec<u8> {
    let mut file = art.to_vec();
    file.push(0x1A);
    let mut record = b"SAUCE00".to_vec();
    record.extend(title.as_bytes());
    record.resize(128, b' ');
    record[94] = 1;
    file.extend(record);
    file
}

#[test]
fn batch_reads_text_and_sauce() {
    let files: Vec<Vec<u8>> = (0..12)
        .map(|i| {
            if i % 3 == 0 {
                with_sauce(b"\x1b[1m\xdb", &format!("piece {i}"))
            } else {
                b"\xb0\xb1\xb2".to_vec()
            }
        })
        .collect();
    let options = Options {
        encoding: "cp437".to_string(),
        ..Options::default()
    };

    let batch = convert_all(&files, Mode::Ansi, &options).expect("batch");
    assert_eq!(batch.total(), 12);
    assert_eq!(batch.success, 12);
    assert_eq!(batch.failed, 0);
    for result in &batch.results {
        let text: String = result.runes.as_ref().expect("runes").iter().collect();
        if result.index % 3 == 0 {
            assert_eq!(text, "\x1b[1m█");
            let sauce = result.sauce.as_ref().expect("sauce");
            assert_eq!(sauce.title, format!("piece {}", result.index));
        } else {
            assert_eq!(text, "░▒▓");
            assert!(result.sauce.is_none());
        }
    }
}
