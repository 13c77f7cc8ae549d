use qrencode::{encode, EcLevel, EncodeOptions, Mode};

fn main() {
    let code = encode(
        "HELLO WORLD",
        EncodeOptions {
            version: None,
            ec_level: EcLevel::Q,
            mode: Mode::Alphanumeric,
        },
    )
    .expect("encoding failed");

    println!(
        "version {} ec_level {:?} mask {} size {}x{}",
        code.version, code.ec_level, code.mask_id, code.size, code.size
    );
    println!(
        "data codewords {} ec codewords {} total {}",
        code.stats.data_codewords, code.stats.ec_codewords, code.stats.total_codewords
    );

    for row in code.matrix.chunks(code.size) {
        let line: String = row.iter().map(|&dark| if dark { '#' } else { ' ' }).collect();
        println!("{line}");
    }
}
