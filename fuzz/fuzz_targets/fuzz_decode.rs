#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Probe, decode, and full conversion must never panic
    let _ = zentga::TgaInfo::from_bytes(data);
    let _ = zentga::decode(data, enough::Unstoppable);
    let _ = zentga::convert(data, &zentga::ConvertOptions::default(), enough::Unstoppable);
});
