use std::{
    sync::Arc,
    thread::JoinHandle,
    time::{Duration, Instant},
};

use crossbeam::channel::{self, Receiver, Sender};
use log::{debug, warn};

use crate::{cutting_plane::PlaneUniform, error::Result, volumetric::LinearVolume};

use super::HistogramBins;

/// Snapshot of the volume and plane at the time of the request
#[derive(Debug, Clone)]
pub struct HistogramRequest {
    pub id: u64,
    pub volume: Arc<LinearVolume>,
    pub plane: Option<PlaneUniform>,
}

#[derive(Debug, Clone)]
pub struct HistogramResponse {
    pub id: u64,
    pub bins: HistogramBins,
}

/// Messages to the worker
enum WorkerMessage {
    Compute(HistogramRequest),
    /// Worker exits, thread gets ready to be joined
    ShutDown,
}

/// Main thread side of the histogram worker.
///
/// Every request gets a new id. Only the response to the newest request is
/// accepted, older ones are dropped when they arrive.
pub struct HistogramClient {
    sender: Sender<WorkerMessage>,
    receiver: Receiver<HistogramResponse>,
    handle: Option<JoinHandle<()>>,
    next_id: u64,
    latest: Option<u64>,
    // id of the bins held
    accepted: Option<u64>,
    bins: Option<HistogramBins>,
}

impl HistogramClient {
    /// Spawns the worker thread
    pub fn new() -> Result<HistogramClient> {
        let (sender, requests) = channel::unbounded();
        let (responses, receiver) = channel::unbounded();

        let handle = std::thread::Builder::new()
            .name("histogram".into())
            .spawn(move || worker_loop(requests, responses))?;

        Ok(HistogramClient {
            sender,
            receiver,
            handle: Some(handle),
            next_id: 0,
            latest: None,
            accepted: None,
            bins: None,
        })
    }

    /// Queue binning of `volume`, supersedes any earlier request
    pub fn request(&mut self, volume: Arc<LinearVolume>, plane: Option<PlaneUniform>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.latest = Some(id);

        let msg = WorkerMessage::Compute(HistogramRequest { id, volume, plane });
        if self.sender.send(msg).is_err() {
            warn!("Histogram worker is gone, request {id} dropped");
        }
        id
    }

    /// Drain arrived responses without blocking.
    /// Returns true if the current bins changed.
    pub fn poll(&mut self) -> bool {
        let mut updated = false;
        while let Ok(response) = self.receiver.try_recv() {
            updated |= self.accept(response);
        }
        updated
    }

    /// Block until the newest request is answered or `timeout` passes
    pub fn wait(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.is_pending() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.receiver.recv_timeout(remaining) {
                Ok(response) => {
                    self.accept(response);
                }
                Err(_) => return false,
            }
        }
        true
    }

    /// Latest accepted bins, `None` before the first response
    pub fn bins(&self) -> Option<&HistogramBins> {
        self.bins.as_ref()
    }

    /// Newest request not answered yet
    pub fn is_pending(&self) -> bool {
        self.latest.is_some() && self.accepted != self.latest
    }

    fn accept(&mut self, response: HistogramResponse) -> bool {
        if Some(response.id) != self.latest {
            debug!("Dropping stale histogram {}", response.id);
            return false;
        }
        self.accepted = Some(response.id);
        self.bins = Some(response.bins);
        true
    }
}

impl Drop for HistogramClient {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            // Worker may already be gone
            let _ = self.sender.send(WorkerMessage::ShutDown);
            if handle.join().is_err() {
                warn!("Histogram worker panicked");
            }
        }
    }
}

fn worker_loop(requests: Receiver<WorkerMessage>, responses: Sender<HistogramResponse>) {
    debug!("Histogram worker started");

    while let Ok(msg) = requests.recv() {
        let mut request = match msg {
            WorkerMessage::Compute(r) => r,
            WorkerMessage::ShutDown => break,
        };

        // Skip requests superseded while we were busy
        let mut shut_down = false;
        while let Ok(msg) = requests.try_recv() {
            match msg {
                WorkerMessage::Compute(newer) => request = newer,
                WorkerMessage::ShutDown => shut_down = true,
            }
        }
        if shut_down {
            break;
        }

        let bins = HistogramBins::from_volume(&request.volume, request.plane.as_ref());
        debug!(
            "Histogram {} done, {} voxels binned",
            request.id,
            bins.total()
        );

        let response = HistogramResponse {
            id: request.id,
            bins,
        };
        if responses.send(response).is_err() {
            break;
        }
    }

    debug!("Histogram worker finished");
}

#[cfg(test)]
mod test {

    use nalgebra::{point, vector};

    use super::*;
    use crate::test_helpers::*;

    const TIMEOUT: Duration = Duration::from_secs(10);

    #[test]
    fn computes_off_thread() {
        let mut client = HistogramClient::new().unwrap();
        assert!(client.bins().is_none());
        assert!(!client.is_pending());

        client.request(Arc::new(uniform_volume(4, 0.5)), None);
        assert!(client.wait(TIMEOUT));

        let bins = client.bins().unwrap();
        assert_eq!(bins.total(), 64);
        assert!(!client.is_pending());
    }

    #[test]
    fn newest_request_wins() {
        let mut client = HistogramClient::new().unwrap();
        let vol = Arc::new(uniform_volume(4, 0.5));

        client.request(Arc::clone(&vol), None);
        let plane = PlaneUniform::new(point![0.0, 0.0, 0.0], vector![0.0, 0.0, 1.0]);
        client.request(Arc::clone(&vol), Some(plane));
        assert!(client.wait(TIMEOUT));

        // whatever arrived first, the accepted bins belong to the plane request
        assert_eq!(client.bins().unwrap().total(), 32);

        // a late stale response cannot overwrite it
        std::thread::sleep(Duration::from_millis(50));
        client.poll();
        assert_eq!(client.bins().unwrap().total(), 32);
    }

    #[test]
    fn empty_result() {
        let mut client = HistogramClient::new().unwrap();
        let plane = PlaneUniform::new(point![100.0, 0.0, 0.0], vector![1.0, 0.0, 0.0]);
        client.request(Arc::new(uniform_volume(2, 0.1)), Some(plane));
        assert!(client.wait(TIMEOUT));
        assert!(client.bins().unwrap().is_empty());
    }

    #[test]
    fn drop_joins_worker() {
        let mut client = HistogramClient::new().unwrap();
        client.request(Arc::new(uniform_volume(8, 0.2)), None);
        drop(client);
    }
}
