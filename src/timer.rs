use std::time::Instant;

pub struct Timer{
    time: Instant,
    prev: u128,
}

impl Timer{
    pub fn new() -> Self{
        let time = Instant::now();
        let prev = time.elapsed().as_millis();
        Self{ time, prev }
    }

    /// Milliseconds since the last checkpoint.
    pub fn elapsed(&self) -> u128{
        self.time.elapsed().as_millis() - self.prev
    }

    pub fn checkpoint(&mut self){
        self.prev = self.time.elapsed().as_millis();
    }

    /// Elapsed time of the step that just finished, then start the next one.
    pub fn lap(&mut self) -> u128{
        let elapsed = self.elapsed();
        self.checkpoint();
        elapsed
    }

    pub fn total(&self) -> u128{
        self.time.elapsed().as_millis()
    }
}
