//! Codec round-trips and failure modes.

mod common;

use common::{
    pk, sample_borrow_position, sample_custody, sample_perpetuals, sample_pool, sample_position,
    sample_position_request, sample_token_ledger,
};
use proptest::prelude::*;

use perps_client::codec::{Decoder, Encoder};
use perps_client::error::DecodeErrorKind;
use perps_client::state::{
    AccountRecord, Custody, Perpetuals, Pool, Position, PositionRequest, Side, TokenLedger,
};

fn roundtrip<T: AccountRecord + PartialEq + std::fmt::Debug>(value: &T) {
    let bytes = value.encode();
    let decoded = T::decode(&bytes).expect("decode");
    assert_eq!(&decoded, value);
}

#[test]
fn perpetuals_roundtrip() {
    roundtrip(&sample_perpetuals());
}

#[test]
fn pool_roundtrip() {
    roundtrip(&sample_pool("JLP", vec![pk(1), pk(2), pk(3)]));
}

#[test]
fn empty_pool_roundtrip() {
    // A fresh pool: short name, no custodies, zero valuation.
    let pool = Pool { name: "JLP".to_owned(), ..Pool::default() };
    roundtrip(&pool);
}

#[test]
fn custody_roundtrip() {
    roundtrip(&sample_custody(pk(1), pk(2)));
}

#[test]
fn position_roundtrip() {
    roundtrip(&sample_position(pk(1), pk(2), pk(3), 1_000_000));
}

#[test]
fn position_request_roundtrip() {
    roundtrip(&sample_position_request(pk(1), pk(2)));
}

#[test]
fn position_request_roundtrip_all_options_present() {
    let request = PositionRequest {
        price_slippage: Some(u64::MAX),
        jupiter_minimum_out: Some(0),
        pre_swap_amount: Some(1),
        trigger_price: Some(42),
        trigger_above_threshold: Some(true),
        entire_position: Some(false),
        referral: Some(pk(0xFE)),
        ..sample_position_request(pk(1), pk(2))
    };
    roundtrip(&request);
}

#[test]
fn borrow_position_roundtrip() {
    roundtrip(&sample_borrow_position(pk(1), pk(2), pk(3)));
}

#[test]
fn token_ledger_roundtrip() {
    roundtrip(&sample_token_ledger());
}

#[test]
fn boundary_values_roundtrip() {
    let position = Position {
        price: u64::MAX,
        size_usd: u64::MAX,
        realised_pnl_usd: i64::MIN,
        cumulative_interest_snapshot: u128::MAX,
        open_time: i64::MAX,
        ..sample_position(pk(1), pk(2), pk(3), u64::MAX)
    };
    roundtrip(&position);
}

#[test]
fn string_encoding_is_length_prefixed_utf8() {
    let mut enc = Encoder::new();
    enc.write_string("JLP");
    let bytes = enc.into_bytes();
    assert_eq!(bytes, vec![3, 0, 0, 0, b'J', b'L', b'P']);

    let mut dec = Decoder::new(&bytes);
    assert_eq!(dec.read_string("name").unwrap(), "JLP");
    assert_eq!(dec.remaining(), 0);
}

#[test]
fn trailing_bytes_are_permitted() {
    let ledger = sample_token_ledger();
    let mut bytes = ledger.encode();
    bytes.extend_from_slice(&[0u8; 17]);
    assert_eq!(TokenLedger::decode(&bytes).unwrap(), ledger);
}

#[test]
fn wrong_discriminator_is_rejected() {
    let bytes = sample_token_ledger().encode();
    let err = Position::decode(&bytes).unwrap_err();
    assert_eq!(err.field, "discriminator");
    assert_eq!(err.offset, 0);
    assert_eq!(err.kind, DecodeErrorKind::DiscriminatorMismatch { record: "Position" });
}

#[test]
fn truncated_buffer_names_the_failing_field() {
    let bytes = sample_position(pk(1), pk(2), pk(3), 5).encode();
    // Cut inside the second pubkey (pool): 8 tag + 32 owner + partial pool.
    let err = Position::decode(&bytes[..8 + 32 + 10]).unwrap_err();
    assert_eq!(err.field, "pool");
    assert_eq!(err.offset, 8 + 32);
    assert_eq!(err.kind, DecodeErrorKind::BufferExhausted { needed: 22 });
}

#[test]
fn invalid_bool_is_rejected() {
    let mut bytes = sample_custody(pk(1), pk(2)).encode();
    // is_stable sits after tag + 3 pubkeys + decimals.
    let offset = 8 + 96 + 1;
    bytes[offset] = 7;
    let err = Custody::decode(&bytes).unwrap_err();
    assert_eq!(err.field, "is_stable");
    assert_eq!(err.offset, offset);
    assert_eq!(err.kind, DecodeErrorKind::InvalidBool { value: 7 });
}

#[test]
fn invalid_enum_tag_is_rejected() {
    let mut bytes = sample_position(pk(1), pk(2), pk(3), 5).encode();
    // side sits after tag + 4 pubkeys + 2 timestamps.
    let offset = 8 + 128 + 16;
    bytes[offset] = 3;
    let err = Position::decode(&bytes).unwrap_err();
    assert_eq!(err.field, "side");
    assert_eq!(err.kind, DecodeErrorKind::InvalidVariant { value: 3 });
}

#[test]
fn invalid_option_flag_is_rejected() {
    let request = PositionRequest {
        price_slippage: None,
        ..sample_position_request(pk(1), pk(2))
    };
    let mut bytes = request.encode();
    // price_slippage flag: tag + 5 pubkeys + 2 i64 + 2 u64 + 3 enum bytes.
    let offset = 8 + 160 + 16 + 16 + 3;
    bytes[offset] = 2;
    let err = PositionRequest::decode(&bytes).unwrap_err();
    assert_eq!(err.field, "price_slippage");
    assert_eq!(err.kind, DecodeErrorKind::InvalidOptionFlag { value: 2 });
}

#[test]
fn invalid_utf8_in_name_is_rejected() {
    let pool = sample_pool("ABCD", vec![]);
    let mut bytes = pool.encode();
    // name bytes start after tag + 4-byte length prefix.
    bytes[12] = 0xFF;
    bytes[13] = 0xFE;
    let err = Pool::decode(&bytes).unwrap_err();
    assert_eq!(err.field, "name");
    assert_eq!(err.kind, DecodeErrorKind::InvalidUtf8);
}

#[test]
fn hostile_vec_count_fails_fast() {
    let mut enc = Encoder::with_discriminator(Perpetuals::discriminator());
    // permissions (7 bools), then a count prefix far past the buffer end.
    for _ in 0..7 {
        enc.write_bool(false);
    }
    enc.write_u32(u32::MAX);
    let err = Perpetuals::decode(&enc.into_bytes()).unwrap_err();
    assert_eq!(err.field, "pools");
    assert!(matches!(err.kind, DecodeErrorKind::BufferExhausted { .. }));
}

#[test]
fn empty_buffer_fails_on_discriminator() {
    let err = TokenLedger::decode(&[]).unwrap_err();
    assert_eq!(err.field, "discriminator");
    assert_eq!(err.kind, DecodeErrorKind::BufferExhausted { needed: 8 });
}

proptest! {
    #[test]
    fn position_roundtrips_for_arbitrary_values(
        price in any::<u64>(),
        size_usd in any::<u64>(),
        collateral_usd in any::<u64>(),
        realised_pnl_usd in any::<i64>(),
        snapshot in any::<u128>(),
        locked_amount in any::<u64>(),
        open_time in any::<i64>(),
        side_tag in 0u8..=2,
        owner_byte in any::<u8>(),
        bump in any::<u8>(),
    ) {
        let position = Position {
            owner: pk(owner_byte),
            pool: pk(owner_byte.wrapping_add(1)),
            custody: pk(owner_byte.wrapping_add(2)),
            collateral_custody: pk(owner_byte.wrapping_add(3)),
            open_time,
            update_time: open_time.wrapping_add(1),
            side: Side::from_u8(side_tag).unwrap(),
            price,
            size_usd,
            collateral_usd,
            realised_pnl_usd,
            cumulative_interest_snapshot: snapshot,
            locked_amount,
            bump,
        };
        let decoded = Position::decode(&position.encode()).unwrap();
        prop_assert_eq!(decoded, position);
    }
}
