use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{seq::SliceRandom, thread_rng, Rng};
use reservation_ledger::{Amenity, BookingRequest, Hotel, ReservationLedger};
use std::sync::Arc;
use std::thread;

// Benchmark for the reservation ledger under concurrent load
pub fn ledger_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("reservation_ledger");

    // Benchmark with different registry sizes
    for hotel_count in [10, 100, 1000].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(hotel_count),
            hotel_count,
            |b, &hotel_count| {
                b.iter(|| {
                    let ledger = Arc::new(ReservationLedger::new());

                    // Seed the registry with hotels of varying amenity counts
                    for i in 0..hotel_count {
                        let amenities: Vec<Amenity> = (0..(i % 5))
                            .map(|a| Amenity::new(format!("amenity{}", a)))
                            .collect();
                        let hotel = Hotel::new(format!("hotel{}", i), 500, 100 + (i as u32 % 400))
                            .with_amenities(amenities);
                        ledger.register_hotel(hotel);
                    }

                    let hotel_names: Vec<String> =
                        (0..hotel_count).map(|i| format!("hotel{}", i)).collect();
                    let person_ids: Vec<u64> = (0..50).map(|i| 700000000000 + i).collect();

                    // Spawn multiple threads to simulate concurrent request handlers
                    let mut handles = vec![];
                    for _ in 0..4 {
                        let ledger = Arc::clone(&ledger);
                        let hotel_names = hotel_names.clone();
                        let person_ids = person_ids.clone();

                        let handle = thread::spawn(move || {
                            let mut rng = thread_rng();

                            // Perform a mix of bookings and queries
                            for _ in 0..250 {
                                let hotel_name = hotel_names.choose(&mut rng).unwrap();
                                let person_id = *person_ids.choose(&mut rng).unwrap();

                                let roll: f64 = rng.gen();
                                if roll < 0.6 {
                                    // 60% bookings
                                    let request = BookingRequest {
                                        hotel_name: hotel_name.clone(),
                                        person_id,
                                        rooms: rng.gen_range(1..4),
                                    };
                                    let _ = ledger.book_room(&request);
                                } else if roll < 0.8 {
                                    // 20% amenity merges
                                    let incoming =
                                        vec![Amenity::new(format!("amenity{}", rng.gen_range(0..8)))];
                                    let _ = ledger.merge_amenities(hotel_name, &incoming);
                                } else if roll < 0.9 {
                                    // 10% booking-count queries
                                    let _ = ledger.bookings_for_person(person_id);
                                } else {
                                    // 10% ranking queries
                                    let _ = ledger.hotel_with_most_amenities();
                                }
                            }
                        });

                        handles.push(handle);
                    }

                    // Wait for all threads to complete
                    for handle in handles {
                        handle.join().unwrap();
                    }

                    // Return stats for verification
                    black_box(ledger.stats())
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, ledger_benchmark);
criterion_main!(benches);
