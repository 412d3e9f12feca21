use metrics::counter;

pub struct Telemetry;

impl Telemetry {
    pub fn record_cache_hit() {
        counter!("autofill_cache_hits_total").increment(1);
    }

    pub fn record_cache_miss() {
        counter!("autofill_cache_misses_total").increment(1);
    }

    pub fn record_degraded(reason: &str) {
        counter!("autofill_degraded_total", "reason" => reason.to_string()).increment(1);
    }

    pub fn record_word_learned() {
        counter!("autofill_words_learned_total").increment(1);
    }
}
