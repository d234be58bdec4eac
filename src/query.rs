use crate::prelude::*;

/// Runs one metric query against `transport` and returns the decoded reply.
///
/// Transport failures surface as a reply with a synthetic `SYS` status;
/// only a malformed reply is an error.
pub async fn query<T>(transport: &T, request: &Request) -> Result<Reply, DecodeError>
where
    T: Transport + Sync + ?Sized,
{
    let frame = request.to_frame();
    debug!(
        "querying inverter {} for {} metrics",
        request.inverter(),
        request.codes().len()
    );

    let raw = transport.exchange(&frame).await;
    let reply = Reply::parse(&raw)?;

    if let Some(status) = reply.status() {
        if status >= StatusCode::READ_ERROR {
            warn!(
                "inverter {} not read: {}",
                request.inverter(),
                status.label().unwrap_or_default()
            );
        }
    }

    Ok(reply)
}

/// [`query`] followed by JSON rendering in the requested shape.
pub async fn query_json<T>(transport: &T, request: &Request, shape: OutputShape) -> Result<String>
where
    T: Transport + Sync + ?Sized,
{
    let reply = query(transport, request).await?;
    reply.to_json(shape)
}
