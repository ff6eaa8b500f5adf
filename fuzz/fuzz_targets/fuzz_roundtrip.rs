#![no_main]
use libfuzzer_sys::fuzz_target;
use zentga::*;

fuzz_target!(|data: &[u8]| {
    // Anything that converts must convert again to the same bytes
    let options = ConvertOptions::default();
    let Ok(first) = convert(data, &options, enough::Unstoppable) else {
        return;
    };
    let Ok(second) = convert(&first, &options, enough::Unstoppable) else {
        panic!("converted output failed to convert again");
    };
    assert_eq!(first, second, "conversion is not idempotent");

    let decoded = decode(data, enough::Unstoppable).unwrap();
    let header = TgaHeader::parse(&first).unwrap();
    assert_eq!(u32::from(header.width), decoded.width);
    assert_eq!(u32::from(header.height), decoded.height);
});
