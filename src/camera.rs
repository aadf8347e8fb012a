// Webcam selection and URL resolution

use crate::models::WebcamConfig;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CameraError {
    #[error("No cameras configured")]
    NoCamerasConfigured,
    #[error("Camera {0} not found")]
    NotFound(String),
}

/// Outcome of one selection step.
enum Step<'a> {
    Found(&'a WebcamConfig),
    Skip,
    Fail(CameraError),
}

type Strategy<'a> = Box<dyn Fn(&'a [WebcamConfig]) -> Step<'a> + 'a>;

fn by_uid<'a>(webcams: &'a [WebcamConfig], uid: &str) -> Option<&'a WebcamConfig> {
    webcams.iter().find(|w| w.uid == uid)
}

/// Pick a webcam. Steps run in order and the first decisive one wins:
/// 1. an explicitly requested uid must exist (else `NotFound`);
/// 2. the persisted selection, when it still resolves;
/// 3. the first configured webcam.
///
/// An empty list is `NoCamerasConfigured` whatever was asked for.
pub fn resolve_camera<'a>(
    webcams: &'a [WebcamConfig],
    requested_uid: Option<&'a str>,
    selected_uid: Option<&'a str>,
) -> Result<&'a WebcamConfig, CameraError> {
    if webcams.is_empty() {
        return Err(CameraError::NoCamerasConfigured);
    }

    let strategies: [Strategy<'a>; 3] = [
        Box::new(move |cams: &'a [WebcamConfig]| match requested_uid {
            Some(uid) => match by_uid(cams, uid) {
                Some(w) => Step::Found(w),
                None => Step::Fail(CameraError::NotFound(uid.to_string())),
            },
            None => Step::Skip,
        }),
        Box::new(move |cams: &'a [WebcamConfig]| {
            match selected_uid.and_then(|uid| by_uid(cams, uid)) {
                Some(w) => Step::Found(w),
                None => Step::Skip,
            }
        }),
        Box::new(|cams: &'a [WebcamConfig]| match cams.first() {
            Some(w) => Step::Found(w),
            None => Step::Skip,
        }),
    ];

    for strategy in &strategies {
        match strategy(webcams) {
            Step::Found(w) => return Ok(w),
            Step::Fail(e) => return Err(e),
            Step::Skip => continue,
        }
    }
    Err(CameraError::NoCamerasConfigured)
}

/// Absolute URLs are kept verbatim; anything else is joined onto `base`
/// (e.g. `http://printer.local:80`).
pub fn absolute_url(base: &str, url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        return url.to_string();
    }
    let base = base.trim_end_matches('/');
    if url.starts_with('/') {
        format!("{}{}", base, url)
    } else {
        format!("{}/{}", base, url)
    }
}
