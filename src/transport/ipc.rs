use crate::{naming, AsyncReadWrite};
use futures::Stream;
pub use parity_tokio_ipc::SecurityAttributes;
use parity_tokio_ipc::{Connection, Endpoint};
use std::io;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum OnConflict {
    Ignore,
    Error,
    Overwrite,
}

/// Socket path (unix) or pipe name (windows) for a service.
pub fn get_socket_address(service_name: &str) -> io::Result<String> {
    let id = naming::endpoint_id(service_name)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    #[cfg(unix)]
    let addr = format!("/tmp/{id}.sock");
    #[cfg(windows)]
    let addr = format!("\\\\.\\pipe\\{id}");
    Ok(addr)
}

pub fn create_endpoint(
    service_name: impl AsRef<str>,
    security_attributes: SecurityAttributes,
    #[allow(unused)] on_conflict: OnConflict,
) -> io::Result<impl Stream<Item = io::Result<impl AsyncReadWrite>> + 'static> {
    let addr = get_socket_address(service_name.as_ref())?;
    #[cfg(unix)]
    {
        if std::path::Path::new(&addr).exists() {
            match on_conflict {
                OnConflict::Error => {
                    return Err(io::Error::new(
                        io::ErrorKind::AlreadyExists,
                        format!("Unable to bind to {addr} because the path already exists"),
                    ))
                }
                OnConflict::Overwrite => {
                    std::fs::remove_file(&addr)?;
                }
                OnConflict::Ignore => {}
            }
        }
    }
    tracing::debug!(%addr, "binding service endpoint");
    let mut endpoint = Endpoint::new(addr);
    endpoint.set_security_attributes(security_attributes);
    endpoint.incoming()
}

pub async fn connect(service_name: impl AsRef<str>) -> io::Result<Connection> {
    Endpoint::connect(get_socket_address(service_name.as_ref())?).await
}
