//! 암호학적 난수 기반 토큰/코드 생성

use rand::RngCore;

/// `byte_len` 바이트의 난수를 소문자 hex 로 돌려줍니다. 결과 길이는 `2 * byte_len`.
pub fn random_hex(byte_len: usize) -> String {
    let mut bytes = vec![0u8; byte_len];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// 추천 코드. 대문자 hex 라 대소문자 혼동 없이 입력할 수 있습니다.
pub fn referral_code(byte_len: usize) -> String {
    random_hex(byte_len).to_uppercase()
}
