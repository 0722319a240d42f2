use ascon_sign::*;
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use signature::{Keypair, Signer, Verifier};

pub fn keygen_benchmark<P: ParameterSet>(c: &mut Criterion) {
    let mut rng = rand::thread_rng();
    c.bench_function(&format!("keygen: {}", P::NAME), |b| {
        b.iter(|| black_box(SigningKey::<P>::new(&mut rng)))
    });
}

pub fn sign_benchmark<P: ParameterSet>(c: &mut Criterion) {
    let mut rng = rand::thread_rng();
    let sk = SigningKey::<P>::new(&mut rng);
    c.bench_function(&format!("sign: {}", P::NAME), |b| {
        b.iter(|| {
            let msg = b"Hello, world!";
            let sig = sk.try_sign(msg).unwrap();
            black_box(sig)
        })
    });
}

pub fn verify_benchmark<P: ParameterSet>(c: &mut Criterion) {
    let mut rng = rand::thread_rng();
    let sk = SigningKey::<P>::new(&mut rng);
    let msg = b"Hello, world!";
    let sig = sk.try_sign(msg).unwrap();
    let vk = sk.verifying_key();
    c.bench_function(&format!("verify: {}", P::NAME), |b| {
        b.iter(|| {
            let ok = vk.verify(msg, &sig);
            black_box(ok)
        })
    });
}

criterion_group!(name = keygen_benches;
    config = Criterion::default().sample_size(10);
    targets = keygen_benchmark<AsconSign128s>, keygen_benchmark<AsconSign128f>,
              keygen_benchmark<AsconSign192s>, keygen_benchmark<AsconSign192f>,
);

criterion_group!(name = sign_benches;
    config = Criterion::default().sample_size(10);
    targets = sign_benchmark<AsconSign128s>, sign_benchmark<AsconSign128f>,
              sign_benchmark<AsconSign192s>, sign_benchmark<AsconSign192f>,
              sign_benchmark<AsconSign128sSimple>, sign_benchmark<AsconSign128fSimple>,
              sign_benchmark<AsconSign192sSimple>, sign_benchmark<AsconSign192fSimple>,
);

criterion_group!(name = verify_benches;
    config = Criterion::default().sample_size(10);
    targets = verify_benchmark<AsconSign128s>, verify_benchmark<AsconSign128f>,
              verify_benchmark<AsconSign192s>, verify_benchmark<AsconSign192f>,
              verify_benchmark<AsconSign128sSimple>, verify_benchmark<AsconSign128fSimple>,
              verify_benchmark<AsconSign192sSimple>, verify_benchmark<AsconSign192fSimple>,
);

criterion_main!(keygen_benches, sign_benches, verify_benches);
