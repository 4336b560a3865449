use rand::SeedableRng;
use rand::rngs::StdRng;
use signing::{
    MessageSignature, PublicKeyFormat, SchnorrSignature, SigningKey, VerifyingKey, verify_message,
};

fn main() {
    let mut rng = StdRng::seed_from_u64(42);
    let sk = SigningKey::random(&mut rng);
    let vk = VerifyingKey::from(&sk);

    let sk_bytes = bincode::serialize(&sk).expect("serialize sk");
    let vk_bytes = bincode::serialize(&vk).expect("serialize vk");

    let msg = b"hello secp256k1";

    let schnorr = sk.sign_schnorr(msg).expect("sign");
    let schnorr_bytes = bincode::serialize(&schnorr).expect("serialize schnorr");

    let signed = sk
        .sign_message(msg, PublicKeyFormat::Compressed, &mut rng)
        .expect("sign message");
    let signed_bytes = bincode::serialize(&signed).expect("serialize message signature");

    let sk2: SigningKey = bincode::deserialize(&sk_bytes).expect("deserialize sk");
    let vk2: VerifyingKey = bincode::deserialize(&vk_bytes).expect("deserialize vk");
    let schnorr2: SchnorrSignature =
        bincode::deserialize(&schnorr_bytes).expect("deserialize schnorr");
    let signed2: MessageSignature =
        bincode::deserialize(&signed_bytes).expect("deserialize message signature");

    assert_eq!(sk, sk2);
    assert!(vk2.verify_schnorr(msg, &schnorr2));

    let address = vk2.address(PublicKeyFormat::Compressed);
    assert!(verify_message(&address.to_string(), msg, &signed2.to_base64()));

    println!("address:   {address}");
    println!("wif:       {}", sk2.to_wif(PublicKeyFormat::Compressed));
    println!("schnorr:   {schnorr2}");
    println!("message:   {signed2}");
}
