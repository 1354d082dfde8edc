use rusb::{ConfigDescriptor, Direction, TransferType};

use crate::{Error, Result};

/// Interrupt endpoints used for one device session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EndpointPair {
    pub interface: u8,
    /// Alternate setting of the interface descriptor the endpoints came from.
    pub setting: u8,
    pub in_address: u8,
    pub out_address: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EndpointInfo {
    pub address: u8,
    pub direction: Direction,
    pub transfer_type: TransferType,
}

impl EndpointInfo {
    #[must_use]
    pub fn interrupt(address: u8, direction: Direction) -> Self {
        Self {
            address,
            direction,
            transfer_type: TransferType::Interrupt,
        }
    }
}

/// One interface descriptor (an interface in one of its alternate settings).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InterfaceInfo {
    pub number: u8,
    pub setting: u8,
    pub endpoints: Vec<EndpointInfo>,
}

impl InterfaceInfo {
    /// Flattens every interface descriptor of `config`, in descriptor order.
    #[must_use]
    pub fn from_config(config: &ConfigDescriptor) -> Vec<Self> {
        config
            .interfaces()
            .flat_map(|i| i.descriptors())
            .map(|idesc| Self {
                number: idesc.interface_number(),
                setting: idesc.setting_number(),
                endpoints: idesc
                    .endpoint_descriptors()
                    .map(|edesc| EndpointInfo {
                        address: edesc.address(),
                        direction: edesc.direction(),
                        transfer_type: edesc.transfer_type(),
                    })
                    .collect(),
            })
            .collect()
    }
}

/// Finds the first interface descriptor exposing both an interrupt IN and
/// an interrupt OUT endpoint.
///
/// Interfaces and endpoints are scanned in descriptor order and the first
/// endpoint of each direction wins, so the result is deterministic even
/// when several interfaces qualify.
///
/// # Errors
/// [`Error::NoSuitableInterface`] if no interface has both.
pub fn resolve<'a, I>(interfaces: I) -> Result<EndpointPair>
where
    I: IntoIterator<Item = &'a InterfaceInfo>,
{
    interfaces
        .into_iter()
        .find_map(|interface| {
            let mut interrupt_endpoints = interface
                .endpoints
                .iter()
                .filter(|edesc| edesc.transfer_type == TransferType::Interrupt);

            let in_address = interrupt_endpoints
                .clone()
                .find(|edesc| edesc.direction == Direction::In)?
                .address;

            let out_address = interrupt_endpoints
                .find(|edesc| edesc.direction == Direction::Out)?
                .address;

            Some(EndpointPair {
                interface: interface.number,
                setting: interface.setting,
                in_address,
                out_address,
            })
        })
        .ok_or(Error::NoSuitableInterface)
}
