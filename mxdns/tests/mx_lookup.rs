//! End-to-end lookups against an in-process stub resolver.

use std::net::{SocketAddr, UdpSocket};
use std::thread;
use std::time::Duration;

use mxdns::proto::cursor::MsgCursor;
use mxdns::proto::rdata::{CNAME, MX};
use mxdns::proto::{Class, Message, Name, RCode, Rdata, Record, RecordType};
use mxdns::{query_async_with, query_with, ResolveError, ResolverConfig};

/// Binds a UDP socket on localhost and answers the next query with the given
/// records, echoing the query's transaction id and question.
fn spawn_stub_resolver(answers: Vec<Record>) -> SocketAddr {
    let socket = UdpSocket::bind("127.0.0.1:0").unwrap();
    let addr = socket.local_addr().unwrap();

    thread::spawn(move || {
        let mut buf = [0u8; 512];
        let (received, peer) = socket.recv_from(&mut buf).unwrap();
        let query = Message::parse(&mut MsgCursor::new(&buf[..received])).unwrap();

        let response = Message::new_response(
            query.header.msg_id,
            RCode::NOERROR,
            query.questions,
            answers,
        );
        socket
            .send_to(&response.encode().unwrap(), peer)
            .unwrap();
    });

    addr
}

fn stub_answers() -> Vec<Record> {
    let owner = Name::from_ascii("example.com").unwrap();
    vec![
        Record::new(
            owner.clone(),
            Class::IN,
            300,
            Rdata::MX(MX {
                preference: 10,
                exchange: Name::from_ascii("mail1.example.com").unwrap(),
            }),
        )
        .unwrap(),
        Record::new(
            owner.clone(),
            Class::IN,
            300,
            Rdata::CNAME(CNAME {
                name: Name::from_ascii("alias.example.com").unwrap(),
            }),
        )
        .unwrap(),
        Record::new(
            owner,
            Class::IN,
            300,
            Rdata::MX(MX {
                preference: 20,
                exchange: Name::from_ascii("mail2.example.com").unwrap(),
            }),
        )
        .unwrap(),
    ]
}

fn config_for(server: SocketAddr) -> ResolverConfig {
    ResolverConfig {
        server,
        timeout: Duration::from_secs(2),
    }
}

#[test]
fn resolves_mx_records_in_wire_order() {
    let server = spawn_stub_resolver(stub_answers());
    let result = query_with(&config_for(server), "example.com", RecordType::MX).unwrap();

    assert_eq!(result.records.len(), 2);
    assert_eq!(result.records[0].preference, 10);
    assert_eq!(result.records[0].exchange.to_string(), "mail1.example.com");
    assert_eq!(result.records[1].preference, 20);
    assert_eq!(result.records[1].exchange.to_string(), "mail2.example.com");
}

#[tokio::test]
async fn resolves_mx_records_asynchronously() {
    let server = spawn_stub_resolver(stub_answers());
    let result = query_async_with(&config_for(server), "example.com", RecordType::MX)
        .await
        .unwrap();

    assert_eq!(result.records.len(), 2);
    assert_eq!(result.records[0].exchange.to_string(), "mail1.example.com");
    assert_eq!(result.records[1].exchange.to_string(), "mail2.example.com");
}

#[test]
fn unanswered_query_times_out() {
    // a bound socket that never replies
    let silent = UdpSocket::bind("127.0.0.1:0").unwrap();
    let server = silent.local_addr().unwrap();

    let config = ResolverConfig {
        server,
        timeout: Duration::from_millis(200),
    };
    let err = query_with(&config, "example.com", RecordType::MX).unwrap_err();
    assert!(matches!(err, ResolveError::Timeout { .. }));

    // the transport's socket was scoped to the call; a fresh attempt binds
    // its own and fails the same way rather than erroring on a leaked one
    let err = query_with(&config, "example.com", RecordType::MX).unwrap_err();
    assert!(matches!(err, ResolveError::Timeout { .. }));
}

#[tokio::test]
async fn unanswered_async_query_times_out() {
    let silent = UdpSocket::bind("127.0.0.1:0").unwrap();
    let server = silent.local_addr().unwrap();

    let config = ResolverConfig {
        server,
        timeout: Duration::from_millis(200),
    };
    let err = query_async_with(&config, "example.com", RecordType::MX)
        .await
        .unwrap_err();
    assert!(matches!(err, ResolveError::Timeout { .. }));
}
